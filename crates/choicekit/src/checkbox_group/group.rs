//! The checkbox group controller.
//!
//! [`CheckboxGroup`] owns the canonical option list and the value binding,
//! keeps the derived [`SelectionSet`] and [`AggregateState`] in step with
//! them, and routes every toggle from its child controls through a single
//! [`dispatch`](CheckboxGroup::dispatch) entry point.
//!
//! # Example
//!
//! ```
//! use choicekit::checkbox_group::{CheckboxGroup, OptionValue, OriginatingEvent};
//!
//! let group = CheckboxGroup::builder()
//!     .with_options([OptionValue::from("apple"), "pear".into(), "plum".into()])
//!     .with_max(2)
//!     .build();
//!
//! group.value_changed().connect(|change| {
//!     println!("{:?} -> {:?}", change.context.trigger, change.value);
//! });
//!
//! group.toggle_all(true, OriginatingEvent::Click);
//! assert_eq!(group.value().len(), 2);
//! assert!(group.state().selection_limit_reached);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use choicekit_core::logging::{span_names, targets};
use choicekit_core::{PerfSpan, Property, Signal};
use parking_lot::{Mutex, ReentrantMutex, RwLock};

use super::aggregate::AggregateState;
use super::binding::ValueBinding;
use super::change::{self, ChangeContext, OriginatingEvent, TriggerType, ValueChange};
use super::context::GroupContext;
use super::option::{
    CheckboxOption, LabelNode, OptionNode, OptionSpec, OptionValue, normalize_options,
    options_from_nodes,
};
use super::selection::{SelectionSet, SelectionValue};
use crate::error::Result;

/// Where the group takes its options from.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionSource {
    /// A declarative options input, normalized whenever it is replaced.
    Declared(Vec<OptionSpec>),
    /// Markup-declared children, recorded on every render pass.
    Markup,
}

impl OptionSource {
    /// Whether a non-empty declarative input is present.
    ///
    /// An empty declarative input falls back to markup children.
    pub fn is_declared(&self) -> bool {
        matches!(self, Self::Declared(specs) if !specs.is_empty())
    }
}

/// One option as handed to the toggle-control renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOption {
    /// Stable key: the identifier followed by the option's position, or
    /// `all` followed by the position for a record without an identifier.
    pub key: String,
    /// The canonical record.
    pub option: CheckboxOption,
    /// Whether the toggle shows as checked.
    pub checked: bool,
    /// Whether a select-all toggle shows as partially checked.
    pub indeterminate: bool,
    /// The rendered label.
    pub label: LabelNode,
}

/// Inputs the derived state was last computed from.
#[derive(Debug, Clone, PartialEq)]
struct DerivedKey {
    value: SelectionValue,
    options_revision: u64,
    max: Option<usize>,
}

#[derive(Debug, Default)]
struct Derived {
    key: Option<DerivedKey>,
    selection_set: Arc<SelectionSet>,
    state: AggregateState,
}

/// Grouped-selection state shared by a set of checkbox controls.
///
/// Create one with [`CheckboxGroup::builder`]. The group is always handled
/// through an `Arc` so child controls can share it via [`GroupContext`].
///
/// # Signals
///
/// - `value_changed(ValueChange)`: every change the group produces, with its
///   context. In controlled groups the consumer must answer with
///   [`set_value`](Self::set_value) for the change to take effect.
/// - `state_changed(AggregateState)`: the aggregate state was recomputed to a
///   different result.
///
/// Slots that keep the group alive should capture a `Weak` reference.
///
/// # Thread Safety
///
/// Value operations (`toggle_one`, `toggle_all`, `set_value`) are serialized:
/// each one reads the value left by the previous operation's completed
/// emission. The lock is reentrant, so slots may call back into the group.
pub struct CheckboxGroup {
    name: String,
    disabled: bool,
    max: Property<Option<usize>>,
    source: RwLock<OptionSource>,
    options: RwLock<Vec<CheckboxOption>>,
    options_revision: AtomicU64,
    binding: ValueBinding,
    derived: Mutex<Derived>,
    /// Held across read, reduce, write and emit.
    update_lock: ReentrantMutex<()>,

    /// Signal emitted when the aggregate state changes.
    pub state_changed: Signal<AggregateState>,
}

impl CheckboxGroup {
    /// Start building a group.
    pub fn builder() -> GroupBuilder {
        GroupBuilder::default()
    }

    fn from_builder(builder: GroupBuilder) -> Self {
        let binding = match builder.value {
            Some(value) => ValueBinding::controlled(value),
            None => ValueBinding::uncontrolled(builder.default_value.unwrap_or_default()),
        };
        let source = match builder.options {
            Some(specs) => OptionSource::Declared(specs),
            None => OptionSource::Markup,
        };
        let options = match &source {
            OptionSource::Declared(specs) => normalize_options(specs, builder.disabled),
            OptionSource::Markup => Vec::new(),
        };
        Self {
            name: builder.name,
            disabled: builder.disabled,
            max: Property::new(builder.max),
            source: RwLock::new(source),
            options: RwLock::new(options),
            options_revision: AtomicU64::new(0),
            binding,
            derived: Mutex::new(Derived::default()),
            update_lock: ReentrantMutex::new(()),
            state_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The group's name, shared with its children.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the whole group is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The maximum selection size, if any.
    pub fn max(&self) -> Option<usize> {
        self.max.get()
    }

    /// Change the maximum selection size.
    pub fn set_max(&self, max: Option<usize>) {
        if self.max.set(max) {
            self.refresh();
        }
    }

    /// Whether the consumer owns the value.
    pub fn is_controlled(&self) -> bool {
        self.binding.is_controlled()
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// The current option source.
    pub fn option_source(&self) -> OptionSource {
        self.source.read().clone()
    }

    /// The canonical option list.
    pub fn options(&self) -> Vec<CheckboxOption> {
        self.options.read().clone()
    }

    /// Replace the declarative options input and re-normalize.
    pub fn set_options(&self, specs: Vec<OptionSpec>) {
        let options = normalize_options(&specs, self.disabled);
        *self.source.write() = OptionSource::Declared(specs);
        self.replace_options(options);
    }

    /// Record markup-declared children as the canonical option list.
    ///
    /// Ignored while a non-empty declarative input is present. Returns whether
    /// the nodes were recorded.
    pub fn register_nodes(&self, nodes: &[OptionNode]) -> bool {
        if self.source.read().is_declared() {
            tracing::trace!(target: targets::CHECKBOX_GROUP, group = %self.name, "declared options present, ignoring markup");
            return false;
        }
        self.replace_options(options_from_nodes(nodes));
        true
    }

    fn replace_options(&self, options: Vec<CheckboxOption>) {
        {
            let mut current = self.options.write();
            if *current == options {
                return;
            }
            *current = options;
        }
        self.options_revision.fetch_add(1, Ordering::SeqCst);
        self.refresh();
    }

    // =========================================================================
    // Value and derived state
    // =========================================================================

    /// The current selection value.
    pub fn value(&self) -> SelectionValue {
        self.binding.value()
    }

    /// Feed an external value into a controlled group.
    ///
    /// Uncontrolled groups own their value and reject the assignment.
    pub fn set_value(&self, value: impl Into<SelectionValue>) -> Result<()> {
        let value = value.into();
        let _guard = self.update_lock.lock();
        match self.binding.assign(value) {
            Ok(changed) => {
                if changed {
                    self.refresh();
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: targets::CHECKBOX_GROUP, group = %self.name, "{err}");
                Err(err)
            }
        }
    }

    /// Signal carrying every selection change and its context.
    pub fn value_changed(&self) -> &Signal<ValueChange> {
        self.binding.changed()
    }

    /// The identifier-to-checked map for the current value.
    pub fn selection_set(&self) -> Arc<SelectionSet> {
        self.refresh().0
    }

    /// The aggregate state for the current value.
    pub fn state(&self) -> AggregateState {
        self.refresh().1
    }

    /// Recompute the derived state if any of its inputs changed.
    ///
    /// Emits `state_changed` after releasing the cache when the aggregate
    /// state differs from the previous result.
    fn refresh(&self) -> (Arc<SelectionSet>, AggregateState) {
        let key = DerivedKey {
            value: self.binding.value(),
            options_revision: self.options_revision.load(Ordering::SeqCst),
            max: self.max.get(),
        };

        let mut derived = self.derived.lock();
        if derived.key.as_ref() == Some(&key) {
            return (derived.selection_set.clone(), derived.state);
        }

        let _span = PerfSpan::new(span_names::RECOMPUTE);
        let selection_set = Arc::new(SelectionSet::rebuild(&derived.selection_set, &key.value));
        let state = AggregateState::compute(&self.options.read(), &key.value, key.max);
        let changed = derived.state != state;
        tracing::trace!(target: targets::CHECKBOX_GROUP, group = %self.name, ?state, "recomputed selection state");

        derived.key = Some(key);
        derived.selection_set = selection_set.clone();
        derived.state = state;
        drop(derived);

        if changed {
            self.state_changed.emit(state);
        }
        (selection_set, state)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Check or uncheck a single identifier.
    ///
    /// Returns the emitted change, or `None` when the current value is not a
    /// list (reported as a warning, nothing is emitted).
    #[tracing::instrument(skip(self), target = "choicekit::checkbox_group", level = "trace")]
    pub fn toggle_one(
        &self,
        value: &OptionValue,
        checked: bool,
        event: OriginatingEvent,
    ) -> Option<ValueChange> {
        let _guard = self.update_lock.lock();
        let next = self
            .binding
            .with_value(|current| change::toggle_one(current, value, checked));
        match next {
            Ok(next) => Some(self.emit_change(
                next,
                ChangeContext {
                    event,
                    trigger: TriggerType::from(checked),
                    current: Some(value.clone()),
                },
            )),
            Err(err) => {
                tracing::warn!(target: targets::CHECKBOX_GROUP, group = %self.name, "{err}");
                None
            }
        }
    }

    /// Select every selectable option (up to `max`), or clear the selection.
    #[tracing::instrument(skip(self), target = "choicekit::checkbox_group", level = "trace")]
    pub fn toggle_all(&self, checked: bool, event: OriginatingEvent) -> ValueChange {
        let _guard = self.update_lock.lock();
        let next = change::toggle_all(&self.options.read(), checked, self.max.get());
        self.emit_change(
            next,
            ChangeContext {
                event,
                trigger: TriggerType::from(checked),
                current: None,
            },
        )
    }

    /// Route a toggle reported by a child control.
    ///
    /// Select-all controls go to [`toggle_all`](Self::toggle_all), all others
    /// to [`toggle_one`](Self::toggle_one). Exactly one of them runs.
    pub fn dispatch(
        &self,
        checked: bool,
        check_all: bool,
        event: OriginatingEvent,
        value: Option<&OptionValue>,
    ) -> Option<ValueChange> {
        if check_all {
            return Some(self.toggle_all(checked, event));
        }
        match value {
            Some(value) => self.toggle_one(value, checked, event),
            None => {
                tracing::warn!(target: targets::CHECKBOX_GROUP, group = %self.name, "toggle from an option without a value ignored");
                None
            }
        }
    }

    fn emit_change(
        &self,
        value: Vec<OptionValue>,
        context: ChangeContext,
    ) -> ValueChange {
        let change = ValueChange {
            value: SelectionValue::List(value),
            context,
        };
        self.binding.write(change.clone());
        self.refresh();
        change
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// The context handed down to child toggle controls.
    pub fn context(self: &Arc<Self>) -> GroupContext {
        GroupContext::new(Arc::clone(self))
    }

    /// Render pass over the canonical option list.
    pub fn render_items(&self) -> Vec<RenderedOption> {
        let (selection_set, state) = self.refresh();
        self.options
            .read()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let key = match &option.value {
                    Some(value) => format!("{value}{index}"),
                    None => format!("all{index}"),
                };
                let (checked, indeterminate) = if option.check_all {
                    (state.all_selected, state.indeterminate)
                } else {
                    let checked = option
                        .value
                        .as_ref()
                        .is_some_and(|value| selection_set.is_checked(value));
                    (checked, false)
                };
                RenderedOption {
                    key,
                    option: option.clone(),
                    checked,
                    indeterminate,
                    label: option.label.render(),
                }
            })
            .collect()
    }

    /// Render pass for markup-declared children.
    ///
    /// Records the nodes into the canonical list first (unless declarative
    /// options are present), then renders.
    pub fn render_nodes(&self, nodes: &[OptionNode]) -> Vec<RenderedOption> {
        self.register_nodes(nodes);
        self.render_items()
    }
}

impl std::fmt::Debug for CheckboxGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckboxGroup")
            .field("name", &self.name)
            .field("disabled", &self.disabled)
            .field("max", &self.max)
            .field("options", &*self.options.read())
            .field("binding", &self.binding)
            .finish()
    }
}

static_assertions::assert_impl_all!(CheckboxGroup: Send, Sync);

/// Builder for [`CheckboxGroup`].
///
/// Supplying [`with_value`](Self::with_value) makes the group controlled;
/// otherwise it owns its value, seeded from
/// [`with_default_value`](Self::with_default_value).
#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    name: String,
    disabled: bool,
    max: Option<usize>,
    options: Option<Vec<OptionSpec>>,
    value: Option<SelectionValue>,
    default_value: Option<SelectionValue>,
}

impl GroupBuilder {
    /// Set the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Disable the whole group.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Limit the selection size.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Limit the selection size, or lift the limit with `None`.
    pub fn with_max_opt(mut self, max: Option<usize>) -> Self {
        self.max = max;
        self
    }

    /// Supply a declarative options input.
    pub fn with_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OptionSpec>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Make the group controlled, starting from `value`.
    pub fn with_value(mut self, value: impl Into<SelectionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Seed an uncontrolled group's value.
    pub fn with_default_value(mut self, value: impl Into<SelectionValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Build the group.
    pub fn build(self) -> Arc<CheckboxGroup> {
        let group = Arc::new(CheckboxGroup::from_builder(self));
        group.refresh();
        tracing::debug!(
            target: targets::CHECKBOX_GROUP,
            group = %group.name,
            controlled = group.is_controlled(),
            options = group.options.read().len(),
            "checkbox group created"
        );
        group
    }
}
