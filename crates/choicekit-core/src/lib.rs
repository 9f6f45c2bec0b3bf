//! Core reactive primitives for choicekit.
//!
//! This crate provides the building blocks the widget-state crate is written
//! against:
//!
//! - **Signal/Slot System**: Synchronous, type-safe change notification
//! - **Property System**: Interior-mutable value cells with change detection
//! - **Logging**: `tracing` targets and span helpers
//!
//! # Example
//!
//! ```
//! use choicekit_core::{Property, Signal};
//!
//! struct Toggle {
//!     checked: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_checked(&self, checked: bool) {
//!         if self.checked.set(checked) {
//!             self.toggled.emit(checked);
//!         }
//!     }
//! }
//!
//! let toggle = Toggle { checked: Property::new(false), toggled: Signal::new() };
//! toggle.toggled.connect(|checked| println!("checked: {checked}"));
//! toggle.set_checked(true);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
