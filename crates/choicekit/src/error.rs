//! Error types for choicekit widget state.

/// Result type alias for choicekit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving widget state.
///
/// None of these are fatal to a group: toggle operations report them as a
/// warning and leave the selection untouched. They surface as `Err` only from
/// configuration loading and explicit value assignment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A per-item toggle fired while the bound value was not a list.
    #[error("checkbox group value must be a list, instead of {found}")]
    ValueNotList { found: &'static str },

    /// An external value was assigned to a group that owns its own value.
    #[error("cannot assign an external value to an uncontrolled checkbox group")]
    UncontrolledAssignment,

    /// Group configuration could not be parsed.
    #[error("invalid {format} group configuration: {message}")]
    Config {
        format: &'static str,
        message: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(format: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            format,
            message: message.into(),
        }
    }
}
