//! choicekit - headless selection state for grouped toggle widgets.
//!
//! This is the main crate; it re-exports the core primitives from
//! `choicekit-core` alongside the widget state.
//!
//! # Example
//!
//! ```
//! use choicekit::checkbox_group::{CheckboxGroup, OptionValue, OriginatingEvent};
//!
//! let group = CheckboxGroup::builder()
//!     .with_options([1, 2, 3].map(OptionValue::from))
//!     .with_default_value([1, 2])
//!     .build();
//!
//! let state = group.state();
//! assert!(state.indeterminate);
//! assert!(!state.all_selected);
//!
//! group.toggle_one(&3.into(), true, OriginatingEvent::Click);
//! assert!(group.state().all_selected);
//! ```

pub use choicekit_core::*;

pub mod checkbox_group;
mod error;

pub use error::{Error, Result};
