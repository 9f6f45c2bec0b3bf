//! Change context and the pure selection reducers.
//!
//! [`toggle_one`] and [`toggle_all`] compute the next selection value from the
//! current one. They never touch group state; the group feeds their result to
//! its value binding together with a [`ChangeContext`].

use std::collections::HashSet;

use super::option::{CheckboxOption, OptionValue};
use super::selection::SelectionValue;
use crate::error::{Error, Result};

/// Whether a change selected or deselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerType {
    /// Items were selected.
    Check,
    /// Items were deselected.
    Uncheck,
}

impl From<bool> for TriggerType {
    fn from(checked: bool) -> Self {
        if checked { Self::Check } else { Self::Uncheck }
    }
}

/// The user interaction that caused a change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OriginatingEvent {
    /// A pointer click on a toggle.
    Click,
    /// A key press on a focused toggle.
    KeyPress {
        /// The key's name, e.g. `"Space"`.
        key: String,
    },
    /// A change made from code rather than by the user.
    #[default]
    Programmatic,
}

/// Why and how a selection value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeContext {
    /// The originating event.
    pub event: OriginatingEvent,
    /// Check or uncheck.
    pub trigger: TriggerType,
    /// The single item involved; `None` for select-all and select-none.
    pub current: Option<OptionValue>,
}

/// A new selection value together with its change context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// The value the group asks its binding to adopt.
    pub value: SelectionValue,
    /// Metadata about the change.
    pub context: ChangeContext,
}

/// Toggle a single identifier.
///
/// Checking appends `value`; unchecking removes its first occurrence and is a
/// no-op when the identifier is absent. Fails when `current` is not a list.
pub fn toggle_one(
    current: &SelectionValue,
    value: &OptionValue,
    checked: bool,
) -> Result<Vec<OptionValue>> {
    let Some(values) = current.as_list() else {
        return Err(Error::ValueNotList {
            found: current.kind(),
        });
    };
    let mut next = values.to_vec();
    if checked {
        next.push(value.clone());
    } else if let Some(index) = next.iter().position(|v| v == value) {
        next.remove(index);
    }
    Ok(next)
}

/// Build the value for a select-all (`checked`) or select-none operation.
///
/// Selecting walks the options in order, skipping select-all records and
/// repeated identifiers, and stops as soon as `max` identifiers are collected.
pub fn toggle_all(options: &[CheckboxOption], checked: bool, max: Option<usize>) -> Vec<OptionValue> {
    if !checked {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    let mut next = Vec::new();
    let selectable = options
        .iter()
        .filter(|option| !option.check_all)
        .filter_map(|option| option.value.as_ref());
    for value in selectable {
        if max.is_some_and(|max| next.len() >= max) {
            break;
        }
        if seen.insert(value) {
            next.push(value.clone());
        }
    }
    next
}
