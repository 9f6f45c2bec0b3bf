//! The context a checkbox group shares with its child controls.

use std::sync::Arc;

use super::change::{OriginatingEvent, ValueChange};
use super::group::CheckboxGroup;
use super::option::OptionValue;
use super::selection::SelectionSet;

/// Read access to a group's derived state plus its dispatch entry point.
///
/// Children receive this explicitly when they are created; they read the
/// derived booleans and report toggles through [`GroupContext::dispatch`],
/// never mutating the selection themselves.
#[derive(Clone)]
pub struct GroupContext {
    group: Arc<CheckboxGroup>,
}

impl GroupContext {
    pub(crate) fn new(group: Arc<CheckboxGroup>) -> Self {
        Self { group }
    }

    /// The group's name.
    pub fn current_name(&self) -> &str {
        self.group.name()
    }

    /// Whether every selectable option is selected.
    pub fn all_selected(&self) -> bool {
        self.group.state().all_selected
    }

    /// Whether some, but not all, selectable options are selected.
    pub fn indeterminate(&self) -> bool {
        self.group.state().indeterminate
    }

    /// Whether the selection holds exactly `max` identifiers.
    pub fn selection_limit_reached(&self) -> bool {
        self.group.state().selection_limit_reached
    }

    /// The identifier-to-checked map.
    pub fn selection_set(&self) -> Arc<SelectionSet> {
        self.group.selection_set()
    }

    /// Whether the whole group is disabled.
    pub fn group_disabled(&self) -> bool {
        self.group.is_disabled()
    }

    /// Report a toggle to the group.
    pub fn dispatch(
        &self,
        checked: bool,
        check_all: bool,
        event: OriginatingEvent,
        value: Option<&OptionValue>,
    ) -> Option<ValueChange> {
        self.group.dispatch(checked, check_all, event, value)
    }
}

impl std::fmt::Debug for GroupContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupContext")
            .field("current_name", &self.current_name())
            .field("state", &self.group.state())
            .finish()
    }
}
