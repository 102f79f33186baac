//! Typed option mappings handed to action kinds at construction time.
//!
//! The declarative configuration parser produces one [`ActionConfig`] per
//! configured action. The core never interprets option names itself; each
//! kind's setup reads the keys it understands through the typed getters,
//! which report type mismatches as [`ConfigError`].
//!
//! ```
//! use fwm_actions::config::ActionConfig;
//!
//! let config = ActionConfig::new()
//!     .with("desktop", 3)
//!     .with("wrap", true);
//! assert_eq!(config.int_or("desktop", 1), Ok(3));
//! assert_eq!(config.bool_or("follow", true), Ok(true));
//! ```

use std::collections::BTreeMap;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One option value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(untagged))]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Table(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Type name used in [`ConfigError::WrongType`] messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a number",
            Self::String(_) => "a string",
            Self::List(_) => "a list",
            Self::Table(_) => "a table",
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// String-keyed option mapping for one action.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(transparent))]
pub struct ActionConfig {
    entries: BTreeMap<String, ConfigValue>,
}

impl ActionConfig {
    /// Empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an option.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw access to an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Boolean option, `None` if absent.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(wrong_type(key, "a boolean", other)),
        }
    }

    /// Integer option, `None` if absent.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(wrong_type(key, "an integer", other)),
        }
    }

    /// Numeric option; integers are widened.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::Float(f)) => Ok(Some(*f)),
            Some(ConfigValue::Int(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(wrong_type(key, "a number", other)),
        }
    }

    /// String option, `None` if absent.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(wrong_type(key, "a string", other)),
        }
    }

    /// List option, `None` if absent.
    pub fn get_list(&self, key: &str) -> Result<Option<&[ConfigValue]>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::List(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(wrong_type(key, "a list", other)),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }

    /// String option that must be present.
    pub fn require_str(&self, key: &str) -> Result<&str, ConfigError> {
        self.get_str(key)?.ok_or_else(|| missing(key))
    }

    /// Integer option that must be present.
    pub fn require_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.get_int(key)?.ok_or_else(|| missing(key))
    }
}

impl<K, V> FromIterator<(K, V)> for ActionConfig
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A named action with its options, as written in a bindings file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct ActionSpec {
    /// Registered kind name.
    pub name: String,
    /// Everything except `name`.
    #[cfg_attr(feature = "config", serde(flatten))]
    pub options: ActionConfig,
}

impl ActionSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ActionConfig::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ActionConfig) -> Self {
        self.options = options;
        self
    }
}

fn wrong_type(key: &str, expected: &'static str, found: &ConfigValue) -> ConfigError {
    ConfigError::WrongType {
        key: key.to_owned(),
        expected,
        found: found.type_name(),
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::Missing {
        key: key.to_owned(),
    }
}
