//! Grouped checkbox selection.
//!
//! A checkbox group keeps one selection value (an ordered list of option
//! identifiers) shared by any number of child toggles, and derives from it:
//!
//! - a [`SelectionSet`] telling each toggle whether it is checked, and
//! - an [`AggregateState`] telling a select-all toggle whether everything,
//!   something, or nothing is selected, and whether the `max` limit is hit.
//!
//! The value changes from three directions: external assignment (controlled
//! groups), a per-item toggle, and the select-all toggle. Every change the
//! group produces goes out through its [`ValueBinding`] as a [`ValueChange`].
//!
//! # Modules
//!
//! - [`option`]: option records and normalization of the options input
//! - [`selection`]: the selection value and the checked map
//! - [`aggregate`]: all-selected / indeterminate / limit computation
//! - [`change`]: change context and the pure reducers
//! - [`binding`]: controlled and uncontrolled value ownership
//! - [`group`]: the [`CheckboxGroup`] controller
//! - [`context`]: what child controls see of their group
//! - [`checkbox`]: the headless child toggle
//! - [`config`]: serde-backed group configuration
//!
//! Duplicate identifiers within one group are unsupported and are not
//! detected.

pub mod aggregate;
pub mod binding;
pub mod change;
pub mod checkbox;
pub mod config;
pub mod context;
pub mod group;
pub mod option;
pub mod selection;

pub use aggregate::AggregateState;
pub use binding::{BindingMode, ValueBinding};
pub use change::{ChangeContext, OriginatingEvent, TriggerType, ValueChange};
pub use checkbox::{CheckState, GroupCheckBox};
pub use config::GroupConfig;
pub use context::GroupContext;
pub use group::{CheckboxGroup, GroupBuilder, OptionSource, RenderedOption};
pub use option::{
    CheckboxOption, LabelBuilder, LabelFn, LabelNode, NodeAttr, OptionLabel, OptionNode,
    OptionSpec, OptionValue, PartialOption, normalize_options, options_from_nodes,
    stringify_label,
};
pub use selection::{SelectionSet, SelectionValue};
