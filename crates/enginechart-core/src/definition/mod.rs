//! Engine Definition File Parser
//!
//! Parses the line-oriented engine files that carry dyno data. These files hold:
//! - `RPMTorque=(rpm, back torque, torque)` sample rows
//! - Boost ladder settings (`EngineBoostRange`, `EngineBoostSetting`, ...)
//! - Arbitrary scalar, string and list keys kept for display

mod error;
mod parser;
mod types;

pub use error::DefinitionError;
pub use parser::{parse_definition, parse_line, Record, RPM_TORQUE_KEY};
pub use types::{DefinitionTable, Value};

use crate::sample::PerformanceSample;
use std::path::Path;

/// Everything read from one definition file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineDefinition {
    /// Generic key/value data (sample rows excluded)
    pub table: DefinitionTable,

    /// Sample rows in file order
    pub samples: Vec<PerformanceSample>,
}

impl EngineDefinition {
    /// Parse an engine definition from a file
    ///
    /// Non-UTF-8 bytes are replaced rather than rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let content = read_definition_file(path)?;
        let definition = Self::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            samples = definition.samples.len(),
            keys = definition.table.len(),
            "parsed engine definition"
        );
        Ok(definition)
    }

    /// Parse an engine definition from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, DefinitionError> {
        parse_definition(content)
    }
}

/// Read a definition file with encoding fallback (UTF-8 first, then lossy)
pub(crate) fn read_definition_file(path: &Path) -> Result<String, DefinitionError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            let bytes = std::fs::read(path).map_err(|e| DefinitionError::IoError(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(e) => Err(DefinitionError::IoError(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_definition() {
        let def = EngineDefinition::default();
        assert!(def.table.is_empty());
        assert!(def.samples.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineDefinition::from_file("/nonexistent/engine.ini").unwrap_err();
        assert!(matches!(err, DefinitionError::IoError(_)));
    }
}
