#![forbid(unsafe_code)]

//! Declarative bindings loaded from TOML or JSON.
//!
//! A bindings file maps triggers to the actions they run:
//!
//! ```toml
//! [[binding]]
//! trigger = "A-Tab"
//!
//! [[binding.actions]]
//! name = "NextWindow"
//! wrap = true
//!
//! [[binding]]
//! trigger = "A-Left"
//! context = "titlebar"
//!
//! [[binding.actions]]
//! name = "Move"
//! ```
//!
//! ```rust,ignore
//! let config = BindingsConfig::from_toml_file("fwm-bindings.toml")?;
//! let (bindings, errors) = config.build(system.registry());
//! ```
//!
//! Triggers are opaque strings here; parsing them into key or button
//! gestures belongs to the event loop.

use std::path::Path;

use fwm_core::trigger::FrameContext;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ActionSpec;
use crate::error::ActionError;
use crate::list::ActionList;
use crate::registry::ActionRegistry;

/// Errors that can occur when loading a bindings file.
#[derive(Debug, Error)]
pub enum BindingsError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// One trigger and the actions it runs, as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub trigger: String,
    /// Frame region the trigger is restricted to; mouse bindings only.
    #[serde(default)]
    pub context: FrameContext,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

/// Every binding in a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    #[serde(rename = "binding")]
    pub bindings: Vec<BindingConfig>,
}

/// A binding with its actions instantiated.
#[derive(Debug, Clone)]
pub struct Binding {
    pub trigger: String,
    pub context: FrameContext,
    pub actions: ActionList,
}

impl BindingsConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BindingsError> {
        toml::from_str(s).map_err(BindingsError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, BindingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BindingsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, BindingsError> {
        serde_json::from_str(s).map_err(BindingsError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BindingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BindingsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the file's shape without consulting a registry.
    ///
    /// Returns a list of problems. An empty list means the file is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            if binding.trigger.trim().is_empty() {
                errors.push(format!("binding[{i}].trigger must not be empty"));
            }
            if binding.actions.is_empty() {
                errors.push(format!(
                    "binding[{i}] ({}) has no actions",
                    binding.trigger
                ));
            }
            for (j, action) in binding.actions.iter().enumerate() {
                if action.name.trim().is_empty() {
                    errors.push(format!("binding[{i}].actions[{j}].name must not be empty"));
                }
            }
        }
        errors
    }

    /// [`validate`](Self::validate), turning problems into an error.
    pub fn validated(self) -> Result<Self, BindingsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(BindingsError::Validation(errors))
        }
    }

    /// Instantiate every binding's actions.
    ///
    /// Misconfigured actions are dropped and reported; the rest of their
    /// binding survives. A binding left with no actions is dropped.
    pub fn build(&self, registry: &ActionRegistry) -> (Vec<Binding>, Vec<ActionError>) {
        let mut bindings = Vec::with_capacity(self.bindings.len());
        let mut errors = Vec::new();
        for binding in &self.bindings {
            let (actions, mut dropped) = ActionList::build_lenient(registry, &binding.actions);
            errors.append(&mut dropped);
            if actions.is_empty() {
                tracing::warn!(
                    target: "fwm.actions",
                    trigger = %binding.trigger,
                    "binding has no usable actions, ignoring it"
                );
                continue;
            }
            bindings.push(Binding {
                trigger: binding.trigger.clone(),
                context: binding.context,
                actions,
            });
        }
        tracing::debug!(
            target: "fwm.actions",
            bindings = bindings.len(),
            dropped_actions = errors.len(),
            "bindings built"
        );
        (bindings, errors)
    }
}
