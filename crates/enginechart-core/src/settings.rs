//! Chart display settings
//!
//! Unit system and curve visibility chosen by the user. Stored as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::series::CurveVisibility;
use crate::unit_conversion::DisplayUnits;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// User-selected display settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Power and torque units
    pub units: DisplayUnits,
    /// Which curves are drawn
    pub visibility: CurveVisibility,
}

impl ChartSettings {
    /// Default location: `<config dir>/EngineChart/settings.json`
    pub fn default_path() -> io::Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?;
        Ok(base.join("EngineChart").join(SETTINGS_FILE))
    }

    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                }
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_conversion::{PowerUnit, TorqueUnit};

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: ChartSettings =
            serde_json::from_str(r#"{ "units": { "power": "HP" } }"#).unwrap();
        assert_eq!(settings.units.power, PowerUnit::Hp);
        assert_eq!(settings.units.torque, TorqueUnit::Nm);
        assert!(settings.visibility.fuel);
    }

    #[test]
    fn test_default_path_file_name() {
        if let Ok(path) = ChartSettings::default_path() {
            assert!(path.ends_with("EngineChart/settings.json"));
        }
    }
}
