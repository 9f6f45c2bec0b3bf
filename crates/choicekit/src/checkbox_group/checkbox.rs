//! A checkbox control that belongs to a checkbox group.
//!
//! [`GroupCheckBox`] is the headless half of a grouped toggle: it derives its
//! check state and enabled state from the [`GroupContext`] it was given and
//! reports clicks back through the context. Painting is left to the caller.
//!
//! # Example
//!
//! ```
//! use choicekit::checkbox_group::{
//!     CheckState, CheckboxGroup, CheckboxOption, GroupCheckBox, OptionValue, OriginatingEvent,
//! };
//!
//! let group = CheckboxGroup::builder()
//!     .with_options([OptionValue::from(1), 2.into()])
//!     .build();
//! let context = group.context();
//!
//! let all = GroupCheckBox::new(CheckboxOption::select_all("All"), context.clone());
//! let first = GroupCheckBox::new(CheckboxOption::new(1, "One"), context);
//!
//! first.click(OriginatingEvent::Click);
//! assert_eq!(all.check_state(), CheckState::PartiallyChecked);
//!
//! all.click(OriginatingEvent::Click);
//! assert_eq!(all.check_state(), CheckState::Checked);
//! ```

use choicekit_core::Signal;

use super::change::{OriginatingEvent, ValueChange};
use super::context::GroupContext;
use super::option::{CheckboxOption, LabelNode};

/// The check state of a checkbox.
///
/// - `Unchecked`: The checkbox is not selected
/// - `Checked`: The checkbox is fully selected
/// - `PartiallyChecked`: Some of the items a select-all box stands for are selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// The checkbox is not checked.
    #[default]
    Unchecked,
    /// The checkbox is checked.
    Checked,
    /// The checkbox is in a partially checked (indeterminate) state.
    PartiallyChecked,
}

impl CheckState {
    /// Returns `true` if the state is `Checked`.
    pub fn is_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Returns `true` if the state is `PartiallyChecked`.
    pub fn is_partially_checked(&self) -> bool {
        matches!(self, CheckState::PartiallyChecked)
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// A checkbox whose state lives in a [`CheckboxGroup`](super::CheckboxGroup).
///
/// # Enabled State
///
/// The box ignores clicks when its option is disabled, when the group is
/// disabled, or (for item boxes) when it is unchecked and the group has
/// reached its selection limit.
///
/// # Signals
///
/// - `clicked(bool)`: emitted after an accepted click, with the checked state
///   the click requested.
pub struct GroupCheckBox {
    option: CheckboxOption,
    context: GroupContext,

    /// Signal emitted when the box is clicked.
    pub clicked: Signal<bool>,
}

impl GroupCheckBox {
    /// Create a checkbox for `option` inside the group behind `context`.
    pub fn new(option: CheckboxOption, context: GroupContext) -> Self {
        Self {
            option,
            context,
            clicked: Signal::new(),
        }
    }

    /// The option this box stands for.
    pub fn option(&self) -> &CheckboxOption {
        &self.option
    }

    /// The rendered label.
    pub fn text(&self) -> LabelNode {
        self.option.label.render()
    }

    /// Whether this is the group's select-all box.
    pub fn is_select_all(&self) -> bool {
        self.option.check_all
    }

    /// The group name the box submits under.
    pub fn name(&self) -> &str {
        self.context.current_name()
    }

    /// The current check state.
    pub fn check_state(&self) -> CheckState {
        if self.option.check_all {
            if self.context.all_selected() {
                CheckState::Checked
            } else if self.context.indeterminate() {
                CheckState::PartiallyChecked
            } else {
                CheckState::Unchecked
            }
        } else {
            let checked = self
                .option
                .value
                .as_ref()
                .is_some_and(|value| self.context.selection_set().is_checked(value));
            CheckState::from(checked)
        }
    }

    /// Check if the box is currently checked.
    pub fn is_checked(&self) -> bool {
        self.check_state().is_checked()
    }

    /// Whether the box currently ignores clicks.
    pub fn is_disabled(&self) -> bool {
        if self.option.disabled || self.context.group_disabled() {
            return true;
        }
        !self.option.check_all && !self.is_checked() && self.context.selection_limit_reached()
    }

    /// Toggle the box as the user would.
    ///
    /// A select-all box checks everything unless everything is already
    /// checked. Returns the change the group emitted, or `None` when the box is
    /// disabled or the group refused the toggle.
    pub fn click(&self, event: OriginatingEvent) -> Option<ValueChange> {
        if self.is_disabled() {
            return None;
        }
        let checked = !self.is_checked();
        let change = self.context.dispatch(
            checked,
            self.option.check_all,
            event,
            self.option.value.as_ref(),
        );
        if change.is_some() {
            self.clicked.emit(checked);
        }
        change
    }
}

impl std::fmt::Debug for GroupCheckBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupCheckBox")
            .field("option", &self.option)
            .field("check_state", &self.check_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::checkbox_group::{CheckboxGroup, OptionValue, SelectionValue};

    fn boxes(group: &Arc<CheckboxGroup>) -> Vec<GroupCheckBox> {
        let context = group.context();
        std::iter::once(CheckboxOption::select_all("All"))
            .chain(group.options())
            .map(|option| GroupCheckBox::new(option, context.clone()))
            .collect()
    }

    #[test]
    fn test_item_click_toggles() {
        let group = CheckboxGroup::builder()
            .with_options(["a", "b"].map(OptionValue::from))
            .build();
        let boxes = boxes(&group);

        boxes[1].click(OriginatingEvent::Click);
        assert!(boxes[1].is_checked());
        assert_eq!(boxes[0].check_state(), CheckState::PartiallyChecked);

        boxes[1].click(OriginatingEvent::Click);
        assert!(!boxes[1].is_checked());
        assert_eq!(boxes[0].check_state(), CheckState::Unchecked);
    }

    #[test]
    fn test_select_all_click_cycles() {
        let group = CheckboxGroup::builder()
            .with_options(["a", "b"].map(OptionValue::from))
            .with_default_value(["a"])
            .build();
        let boxes = boxes(&group);

        boxes[0].click(OriginatingEvent::Click);
        assert_eq!(group.value(), SelectionValue::from(["a", "b"]));
        assert!(boxes[2].is_checked());

        boxes[0].click(OriginatingEvent::KeyPress { key: "Space".into() });
        assert!(group.value().is_empty());
    }

    #[test]
    fn test_limit_disables_unchecked_items() {
        let group = CheckboxGroup::builder()
            .with_options(["a", "b", "c"].map(OptionValue::from))
            .with_max(1)
            .build();
        let boxes = boxes(&group);

        boxes[1].click(OriginatingEvent::Click);
        assert!(!boxes[1].is_disabled());
        assert!(boxes[2].is_disabled());
        assert!(boxes[2].click(OriginatingEvent::Click).is_none());
        assert!(!boxes[0].is_disabled());
        assert_eq!(group.value(), SelectionValue::from(["a"]));
    }

    #[test]
    fn test_group_disabled() {
        let group = CheckboxGroup::builder()
            .with_disabled(true)
            .with_options(["a"].map(OptionValue::from))
            .build();
        let boxes = boxes(&group);

        assert!(boxes[1].option().disabled);
        assert!(boxes[0].is_disabled());
        assert!(boxes[1].click(OriginatingEvent::Click).is_none());
        assert!(group.value().is_empty());
    }

    #[test]
    fn test_clicked_signal() {
        let group = CheckboxGroup::builder()
            .with_name("fruit")
            .with_options(["a"].map(OptionValue::from))
            .build();
        let boxes = boxes(&group);
        let clicks = Arc::new(Mutex::new(Vec::new()));

        let clicks_clone = clicks.clone();
        boxes[1].clicked.connect(move |&checked| clicks_clone.lock().push(checked));
        boxes[1].click(OriginatingEvent::Click);
        boxes[1].click(OriginatingEvent::Click);

        assert_eq!(*clicks.lock(), vec![true, false]);
        assert_eq!(boxes[1].name(), "fruit");
        assert_eq!(boxes[1].text().as_str(), "a");
    }

    #[test]
    fn test_check_state_conversions() {
        assert_eq!(CheckState::from(true), CheckState::Checked);
        assert_eq!(CheckState::from(false), CheckState::Unchecked);
        assert!(CheckState::PartiallyChecked.is_partially_checked());
        assert!(!CheckState::PartiallyChecked.is_checked());
    }
}
