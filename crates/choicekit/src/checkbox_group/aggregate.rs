//! Aggregate selection state: all-selected, indeterminate, limit reached.
//!
//! Everything here is a pure function of the option list, the selection
//! value, and the optional maximum. Nothing is updated incrementally.

use std::collections::HashSet;

use super::option::{CheckboxOption, OptionValue};
use super::selection::SelectionValue;

/// The derived state shown by a select-all control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateState {
    /// Every selectable option is selected and nothing else is.
    pub all_selected: bool,
    /// Some, but not all, selectable options are selected.
    pub indeterminate: bool,
    /// The selection holds exactly `max` identifiers.
    pub selection_limit_reached: bool,
    /// Distinct selected identifiers that name a selectable option.
    pub intersection_count: usize,
    /// Options other than the select-all record.
    pub selectable_count: usize,
}

impl AggregateState {
    /// Compute the aggregate state.
    ///
    /// `selectable_count` subtracts exactly one when any select-all record
    /// is present, however many there are.
    pub fn compute(
        options: &[CheckboxOption],
        value: &SelectionValue,
        max: Option<usize>,
    ) -> Self {
        let selectable_count = selectable_count(options);
        let intersection_count = intersection_count(options, value);
        let len = value.len();

        let all_selected =
            selectable_count > 0 && intersection_count == selectable_count && len <= selectable_count;
        let indeterminate =
            !all_selected && intersection_count > 0 && intersection_count < selectable_count;
        let selection_limit_reached = max.is_some_and(|max| len == max);

        Self {
            all_selected,
            indeterminate,
            selection_limit_reached,
            intersection_count,
            selectable_count,
        }
    }
}

/// Options that can be selected individually.
pub fn selectable_count(options: &[CheckboxOption]) -> usize {
    if options.iter().any(|option| option.check_all) {
        options.len() - 1
    } else {
        options.len()
    }
}

/// Distinct identifiers present in both the value and the selectable options.
pub fn intersection_count(options: &[CheckboxOption], value: &SelectionValue) -> usize {
    let Some(values) = value.as_list() else {
        return 0;
    };
    let selectable: HashSet<&OptionValue> = options
        .iter()
        .filter(|option| !option.check_all)
        .filter_map(|option| option.value.as_ref())
        .collect();
    values
        .iter()
        .filter(|value| selectable.contains(value))
        .collect::<HashSet<_>>()
        .len()
}
