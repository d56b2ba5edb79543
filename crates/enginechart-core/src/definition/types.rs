//! Value types for the generic key/value table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::DefinitionError;

/// A value from a `key=value` line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Bare number, e.g. `FuelConsumption=0.004`
    Number(f64),
    /// Quoted string, e.g. `Name="V8"`
    Text(String),
    /// Parenthesized list, e.g. `EngineBoostRange=(0, 1, 5)`
    NumberList(Vec<f64>),
}

impl Value {
    /// Get as number, returning None if not a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as text, returning None if not text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as numeric list, returning None if not a list
    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Value::NumberList(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "a number",
            Value::Text(_) => "text",
            Value::NumberList(_) => "a number list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::NumberList(values) => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Case-insensitive key/value table. Later inserts replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionTable {
    /// Lowercased key -> (key as written in the file, value)
    entries: HashMap<String, (String, Value)>,
}

impl DefinitionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing entry with the same key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.entries.insert(key.to_ascii_lowercase(), (key, value));
    }

    /// Look up a value by key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|(_, value)| value)
    }

    /// Whether the table contains the key (case-insensitive)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key as written, value)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value))
    }

    fn require(&self, key: &str) -> Result<&Value, DefinitionError> {
        self.get(key)
            .ok_or_else(|| DefinitionError::MissingKey(key.to_string()))
    }

    /// Get a numeric scalar
    pub fn number(&self, key: &str) -> Result<f64, DefinitionError> {
        let value = self.require(key)?;
        value.as_number().ok_or(DefinitionError::TypeMismatch {
            key: key.to_string(),
            expected: "a number",
            found: value.kind(),
        })
    }

    /// Get a quoted string
    pub fn text(&self, key: &str) -> Result<&str, DefinitionError> {
        let value = self.require(key)?;
        value.as_text().ok_or(DefinitionError::TypeMismatch {
            key: key.to_string(),
            expected: "text",
            found: value.kind(),
        })
    }

    /// Get a numeric list
    pub fn list(&self, key: &str) -> Result<&[f64], DefinitionError> {
        let value = self.require(key)?;
        value.as_list().ok_or(DefinitionError::TypeMismatch {
            key: key.to_string(),
            expected: "a number list",
            found: value.kind(),
        })
    }

    /// Get one element of a numeric list
    pub fn list_item(&self, key: &str, index: usize) -> Result<f64, DefinitionError> {
        let list = self.list(key)?;
        list.get(index)
            .copied()
            .ok_or(DefinitionError::IndexOutOfRange {
                key: key.to_string(),
                index,
                len: list.len(),
            })
    }
}
