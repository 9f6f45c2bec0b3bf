//! The selection value and the per-identifier checked map derived from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::option::OptionValue;

/// The value bound to a checkbox group.
///
/// A well-formed value is an ordered list of identifiers. Consumers that bind
/// a single identifier instead produce [`SelectionValue::Scalar`]; the group
/// keeps rendering with it but refuses per-item toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    /// Ordered selected identifiers.
    List(Vec<OptionValue>),
    /// A single identifier bound where a list was expected.
    Scalar(OptionValue),
}

impl SelectionValue {
    /// An empty list.
    pub fn empty() -> Self {
        Self::List(Vec::new())
    }

    /// The identifiers, if the value is a list.
    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            Self::List(values) => Some(values),
            Self::Scalar(_) => None,
        }
    }

    /// Number of selected identifiers; a non-list value counts as zero.
    pub fn len(&self) -> usize {
        self.as_list().map_or(0, <[OptionValue]>::len)
    }

    /// Whether no identifier is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `value` is in the list.
    pub fn contains(&self, value: &OptionValue) -> bool {
        self.as_list().is_some_and(|values| values.contains(value))
    }

    /// Short name of the value's shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Scalar(OptionValue::Int(_)) => "number",
            Self::Scalar(OptionValue::Text(_)) => "string",
        }
    }
}

impl Default for SelectionValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<OptionValue>> for SelectionValue {
    fn from(values: Vec<OptionValue>) -> Self {
        Self::List(values)
    }
}

impl<T: Into<OptionValue>, const N: usize> From<[T; N]> for SelectionValue {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Map from identifier to "checked", rebuilt from the selection value.
///
/// Identifiers in the value that match no option are still recorded; they
/// simply have no toggle to reflect them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    checked: HashMap<OptionValue, bool>,
}

impl SelectionSet {
    /// Build the map from a list of identifiers.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a OptionValue>) -> Self {
        Self {
            checked: values.into_iter().map(|v| (v.clone(), true)).collect(),
        }
    }

    /// Rebuild the map for `value`.
    ///
    /// A non-list value leaves the previous map in place.
    pub fn rebuild(previous: &SelectionSet, value: &SelectionValue) -> Self {
        match value.as_list() {
            Some(values) => Self::from_values(values),
            None => previous.clone(),
        }
    }

    /// Whether `value` is checked.
    pub fn is_checked(&self, value: &OptionValue) -> bool {
        self.checked.get(value).copied().unwrap_or(false)
    }

    /// Number of checked identifiers.
    pub fn len(&self) -> usize {
        self.checked.len()
    }

    /// Whether nothing is checked.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Iterate over the checked identifiers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionValue> {
        self.checked
            .iter()
            .filter_map(|(value, checked)| checked.then_some(value))
    }
}
