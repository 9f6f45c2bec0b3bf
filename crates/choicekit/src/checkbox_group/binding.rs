//! Two-way value binding for a checkbox group.
//!
//! A [`ValueBinding`] is either *controlled* or *uncontrolled*, fixed when it
//! is created:
//!
//! - **Controlled**: the consumer owns the value. Every change the group
//!   produces is only announced through [`ValueBinding::changed`]; the stored
//!   value moves when the consumer assigns it back with
//!   [`ValueBinding::assign`].
//! - **Uncontrolled**: the binding owns the value, seeded once from a default.
//!   Changes are stored first and then announced.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use choicekit::checkbox_group::{SelectionValue, ValueBinding};
//!
//! let binding = Arc::new(ValueBinding::controlled(SelectionValue::empty()));
//! let weak = Arc::downgrade(&binding);
//! binding.changed().connect(move |change| {
//!     if let Some(binding) = weak.upgrade() {
//!         binding.assign(change.value.clone()).unwrap();
//!     }
//! });
//! ```

use choicekit_core::logging::targets;
use choicekit_core::{Property, Signal};

use super::change::ValueChange;
use super::selection::SelectionValue;
use crate::error::{Error, Result};

/// Who owns the bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// The consumer owns the value and feeds changes back in.
    Controlled,
    /// The binding owns the value after seeding it from a default.
    Uncontrolled,
}

/// The controlled-or-owned value cell behind a checkbox group.
pub struct ValueBinding {
    mode: BindingMode,
    value: Property<SelectionValue>,
    changed: Signal<ValueChange>,
}

impl ValueBinding {
    /// A binding whose value is owned by the consumer.
    pub fn controlled(value: SelectionValue) -> Self {
        Self {
            mode: BindingMode::Controlled,
            value: Property::new(value),
            changed: Signal::new(),
        }
    }

    /// A binding that owns its value, starting from `default`.
    pub fn uncontrolled(default: SelectionValue) -> Self {
        Self {
            mode: BindingMode::Uncontrolled,
            value: Property::new(default),
            changed: Signal::new(),
        }
    }

    /// The ownership mode.
    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    /// Whether the consumer owns the value.
    pub fn is_controlled(&self) -> bool {
        self.mode == BindingMode::Controlled
    }

    /// The current value.
    pub fn value(&self) -> SelectionValue {
        self.value.get()
    }

    /// Access the current value without cloning.
    pub fn with_value<R>(&self, f: impl FnOnce(&SelectionValue) -> R) -> R {
        self.value.with(f)
    }

    /// Signal carrying every change the group asks the binding to adopt.
    pub fn changed(&self) -> &Signal<ValueChange> {
        &self.changed
    }

    /// Hand a change to the binding.
    ///
    /// Uncontrolled bindings store the value before announcing it; controlled
    /// bindings only announce it.
    pub fn write(&self, change: ValueChange) {
        if self.mode == BindingMode::Uncontrolled {
            self.value.set(change.value.clone());
        }
        tracing::debug!(
            target: targets::BINDING,
            mode = ?self.mode,
            value = ?change.value,
            trigger = ?change.context.trigger,
            "selection change"
        );
        self.changed.emit(change);
    }

    /// Assign an external value to a controlled binding.
    ///
    /// Returns whether the value changed. Uncontrolled bindings reject the
    /// assignment; ownership never switches after creation.
    pub fn assign(&self, value: SelectionValue) -> Result<bool> {
        match self.mode {
            BindingMode::Controlled => Ok(self.value.set(value)),
            BindingMode::Uncontrolled => Err(Error::UncontrolledAssignment),
        }
    }
}

impl std::fmt::Debug for ValueBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueBinding")
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("connections", &self.changed.connection_count())
            .finish()
    }
}
