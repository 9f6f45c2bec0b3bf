//! Logging and tracing facilities for choicekit.
//!
//! choicekit uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("choicekit=debug,choicekit_core=warn")
//!     .init();
//! ```
//!
//! Usage mistakes that the widget state recovers from (for example toggling an
//! item while the bound value is not a list) are reported at `warn` level under
//! [`targets::CHECKBOX_GROUP`]; every emitted selection change is logged at
//! `debug`, and derived-state recomputation at `trace`.

/// Span names used throughout choicekit for tracing.
pub mod span_names {
    /// Derived selection state recomputation span.
    pub const RECOMPUTE: &str = "choicekit::recompute";
    /// Option list normalization span.
    pub const NORMALIZE: &str = "choicekit::normalize";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "choicekit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "choicekit_core::signal";
    /// Performance spans target.
    pub const PERF: &str = "choicekit_core::perf";
    /// Checkbox group state target.
    pub const CHECKBOX_GROUP: &str = "choicekit::checkbox_group";
    /// Value binding target.
    pub const BINDING: &str = "choicekit::checkbox_group::binding";
    /// Group configuration target.
    pub const CONFIG: &str = "choicekit::checkbox_group::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time derived-state recomputation and option normalization.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span named after `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::trace_span!(target: "choicekit_core::perf", "perf", operation);
        Self {
            span: span.entered(),
        }
    }
}
