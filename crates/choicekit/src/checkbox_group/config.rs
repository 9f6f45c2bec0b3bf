//! Declarative checkbox group configuration.
//!
//! A [`GroupConfig`] describes a group the way a settings file or a UI
//! description would, and builds the live [`CheckboxGroup`] from it.
//!
//! # JSON
//!
//! ```
//! use choicekit::checkbox_group::GroupConfig;
//!
//! let config = GroupConfig::from_json_str(r#"{
//!     "name": "fruit",
//!     "max": 2,
//!     "options": [{ "label": "All", "checkAll": true }, "apple", "pear", "plum"],
//!     "defaultValue": ["apple"]
//! }"#)?;
//!
//! let group = config.build();
//! assert!(group.state().indeterminate);
//! # Ok::<(), choicekit::Error>(())
//! ```
//!
//! # TOML
//!
//! ```
//! use choicekit::checkbox_group::GroupConfig;
//!
//! let config = GroupConfig::from_toml_str(r#"
//! name = "sizes"
//! disabled = true
//! value = [1]
//!
//! [[options]]
//! value = 1
//! label = "Small"
//!
//! [[options]]
//! value = 2
//! label = "Large"
//! "#)?;
//!
//! let group = config.build();
//! assert!(group.is_controlled());
//! assert!(group.options().iter().all(|option| option.disabled));
//! # Ok::<(), choicekit::Error>(())
//! ```

use std::sync::Arc;

use choicekit_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::group::CheckboxGroup;
use super::option::OptionSpec;
use super::selection::SelectionValue;
use crate::error::{Error, Result};

/// Declarative description of a checkbox group.
///
/// Setting `value` makes the group controlled; otherwise it owns its value,
/// seeded from `default_value`. Omitting `options` makes the group take its
/// options from markup children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupConfig {
    /// Group name shared with child controls.
    pub name: String,
    /// Disable the whole group.
    pub disabled: bool,
    /// Maximum selection size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// Declarative options input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionSpec>>,
    /// Controlled value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<SelectionValue>,
    /// Initial value of an uncontrolled group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<SelectionValue>,
}

impl GroupConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            tracing::warn!(target: targets::CONFIG, error = %e, "invalid JSON group configuration");
            Error::config("JSON", e.to_string())
        })
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| {
            tracing::warn!(target: targets::CONFIG, error = %e, "invalid TOML group configuration");
            Error::config("TOML", e.to_string())
        })
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::config("JSON", e.to_string()))
    }

    /// Build the live group.
    pub fn build(&self) -> Arc<CheckboxGroup> {
        let mut builder = CheckboxGroup::builder()
            .with_name(self.name.clone())
            .with_disabled(self.disabled)
            .with_max_opt(self.max);
        if let Some(options) = &self.options {
            builder = builder.with_options(options.iter().cloned());
        }
        if let Some(value) = &self.value {
            builder = builder.with_value(value.clone());
        }
        if let Some(default_value) = &self.default_value {
            builder = builder.with_default_value(default_value.clone());
        }
        builder.build()
    }
}
