//! Boost Model
//!
//! A discrete ladder of engine boost settings and the coefficients through
//! which the selected level scales the derived curves.
//!
//! Levels are `min, min + step, min + 2 * step, ...`; the active level is
//! `min + step * index`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::{DefinitionError, DefinitionTable};

/// `(min, step, range)` triple
pub const KEY_BOOST_RANGE: &str = "EngineBoostRange";
/// Selected level index
pub const KEY_BOOST_SETTING: &str = "EngineBoostSetting";
/// Torque coefficient
pub const KEY_BOOST_TORQUE: &str = "BoostTorque";
/// Power coefficient
pub const KEY_BOOST_POWER: &str = "BoostPower";
/// `(rpm, fuel, wear)` coefficients
pub const KEY_BOOST_EFFECTS: &str = "BoostEffects";

const REQUIRED_KEYS: [&str; 5] = [
    KEY_BOOST_RANGE,
    KEY_BOOST_SETTING,
    KEY_BOOST_TORQUE,
    KEY_BOOST_POWER,
    KEY_BOOST_EFFECTS,
];

/// Errors raised when changing the boost selection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoostError {
    #[error("Invalid boost setting: {value} is not on the boost ladder")]
    InvalidSetting { value: i32 },

    #[error("Invalid boost index {index} for a ladder of {range} levels")]
    InvalidIndex { index: i32, range: i32 },
}

/// Per-level multipliers applied to the derived curves
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostCoefficients {
    /// Torque change per boost unit
    pub torque: f64,
    /// Power change per boost unit
    pub power: f64,
    /// RPM response per boost unit
    pub rpm: f64,
    /// Fuel consumption change per boost unit
    pub fuel: f64,
    /// Engine wear change per boost unit
    pub wear: f64,
}

/// Boost ladder plus the selected level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    /// First level value
    pub min: i32,
    /// Distance between levels
    pub step: i32,
    /// Number of levels
    pub range: i32,
    /// Selected level
    pub index: i32,
    /// Curve coefficients
    pub coefficients: BoostCoefficients,
    /// Whether this configuration came from a complete set of boost keys
    configured: bool,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self::neutral()
    }
}

impl BoostConfig {
    /// All-zero configuration; every factor is the identity
    pub fn neutral() -> Self {
        Self {
            min: 0,
            step: 0,
            range: 0,
            index: 0,
            coefficients: BoostCoefficients::default(),
            configured: false,
        }
    }

    /// Build a configured ladder directly
    pub fn new(min: i32, step: i32, range: i32, index: i32, coefficients: BoostCoefficients) -> Self {
        Self {
            min,
            step,
            range,
            index,
            coefficients,
            configured: true,
        }
    }

    /// Build from a definition table
    ///
    /// Returns the neutral configuration when any of the five boost keys is
    /// missing. Keys that are present but have the wrong shape are an error.
    pub fn from_table(table: &DefinitionTable) -> Result<Self, DefinitionError> {
        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !table.contains_key(key)) {
            tracing::debug!(key = missing, "boost key missing, using neutral boost configuration");
            return Ok(Self::neutral());
        }

        let config = Self::new(
            ladder_int(KEY_BOOST_RANGE, table.list_item(KEY_BOOST_RANGE, 0)?)?,
            ladder_int(KEY_BOOST_RANGE, table.list_item(KEY_BOOST_RANGE, 1)?)?,
            ladder_int(KEY_BOOST_RANGE, table.list_item(KEY_BOOST_RANGE, 2)?)?,
            ladder_int(KEY_BOOST_SETTING, table.number(KEY_BOOST_SETTING)?)?,
            BoostCoefficients {
                torque: table.number(KEY_BOOST_TORQUE)?,
                power: table.number(KEY_BOOST_POWER)?,
                rpm: table.list_item(KEY_BOOST_EFFECTS, 0)?,
                fuel: table.list_item(KEY_BOOST_EFFECTS, 1)?,
                wear: table.list_item(KEY_BOOST_EFFECTS, 2)?,
            },
        );

        // Every level the ladder can name must be representable
        if config.checked_level(config.index).is_none() {
            return Err(DefinitionError::InvalidValue {
                key: KEY_BOOST_SETTING.to_string(),
                message: format!(
                    "level {} of a ladder starting at {} with step {} overflows",
                    config.index, config.min, config.step
                ),
            });
        }
        let last = config
            .range
            .checked_sub(1)
            .and_then(|last| config.checked_level(last));
        if last.is_none() {
            return Err(DefinitionError::InvalidValue {
                key: KEY_BOOST_RANGE.to_string(),
                message: format!(
                    "({}, {}, {}) overflows the boost ladder",
                    config.min, config.step, config.range
                ),
            });
        }

        tracing::debug!(
            min = config.min,
            step = config.step,
            range = config.range,
            index = config.index,
            "adopted boost configuration"
        );
        Ok(config)
    }

    /// Replace this configuration from a table. Left unchanged on error.
    pub fn configure(&mut self, table: &DefinitionTable) -> Result<(), DefinitionError> {
        *self = Self::from_table(table)?;
        Ok(())
    }

    /// Whether a complete boost configuration was adopted
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Boost value of the selected level
    pub fn actual_boost(&self) -> i32 {
        saturate(self.wide_level(i64::from(self.index)))
    }

    /// Select the level whose value equals `value`
    ///
    /// Levels count up from `min` while below `range`; the bound compares
    /// against `range` itself, not against the last level value.
    pub fn set_actual_boost(&mut self, value: i32) -> Result<(), BoostError> {
        let (min, step, range, target) = (
            i64::from(self.min),
            i64::from(self.step),
            i64::from(self.range),
            i64::from(value),
        );
        let index = if min >= range || target < min || target >= range {
            None
        } else if step <= 0 {
            // Only the first level is reachable
            (target == min).then_some(0)
        } else if (target - min) % step == 0 {
            i32::try_from((target - min) / step).ok()
        } else {
            None
        };

        match index {
            Some(index) => {
                self.index = index;
                Ok(())
            }
            None => {
                tracing::warn!(value, "rejected boost setting");
                Err(BoostError::InvalidSetting { value })
            }
        }
    }

    /// Select a level by index
    pub fn set_index(&mut self, index: i32) -> Result<(), BoostError> {
        if index < 0 || index >= self.range {
            return Err(BoostError::InvalidIndex {
                index,
                range: self.range,
            });
        }
        self.index = index;
        Ok(())
    }

    /// Upper display bound of the ladder, `min + step * range`
    pub fn max_boost(&self) -> f64 {
        f64::from(self.min) + f64::from(self.step) * f64::from(self.range)
    }

    /// Value of the highest selectable level, `min + step * (range - 1)`
    pub fn max_boost_setting(&self) -> i32 {
        saturate(self.wide_level(i64::from(self.range) - 1))
    }

    /// Value of level `index`, or `None` when it does not fit in `i32`
    fn checked_level(&self, index: i32) -> Option<i32> {
        self.step.checked_mul(index)?.checked_add(self.min)
    }

    fn wide_level(&self, index: i64) -> i64 {
        i64::from(self.min) + i64::from(self.step) * index
    }

    fn scale(&self, coefficient: f64) -> f64 {
        1.0 + f64::from(self.actual_boost()) * coefficient
    }

    /// Multiplier on raw torque
    pub fn torque_factor(&self) -> f64 {
        self.scale(self.coefficients.torque)
    }

    /// Multiplier on power
    pub fn power_factor(&self) -> f64 {
        self.scale(self.coefficients.power)
    }

    /// Offset added to rpm in the angular velocity term
    pub fn rpm_offset(&self) -> f64 {
        self.scale(self.coefficients.rpm)
    }

    /// Multiplier on fuel consumption
    pub fn fuel_factor(&self) -> f64 {
        self.scale(self.coefficients.fuel)
    }

    /// Multiplier on engine wear
    pub fn wear_factor(&self) -> f64 {
        self.scale(self.coefficients.wear)
    }
}

/// Truncate a file number to a ladder integer
fn ladder_int(key: &str, value: f64) -> Result<i32, DefinitionError> {
    let truncated = value.trunc();
    if !truncated.is_finite()
        || truncated < f64::from(i32::MIN)
        || truncated > f64::from(i32::MAX)
    {
        return Err(DefinitionError::InvalidValue {
            key: key.to_string(),
            message: format!("{} is not a valid boost ladder integer", value),
        });
    }
    Ok(truncated as i32)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Value;

    fn boost_table() -> DefinitionTable {
        let mut table = DefinitionTable::new();
        table.insert(KEY_BOOST_RANGE, Value::NumberList(vec![0.0, 1.0, 5.0]));
        table.insert(KEY_BOOST_SETTING, Value::Number(2.0));
        table.insert(KEY_BOOST_TORQUE, Value::Number(0.05));
        table.insert(KEY_BOOST_POWER, Value::Number(0.03));
        table.insert(KEY_BOOST_EFFECTS, Value::NumberList(vec![0.1, 0.02, 0.01]));
        table
    }

    #[test]
    fn test_neutral_is_identity() {
        let boost = BoostConfig::neutral();
        assert_eq!(boost.actual_boost(), 0);
        assert_eq!(boost.torque_factor(), 1.0);
        assert_eq!(boost.power_factor(), 1.0);
        assert_eq!(boost.fuel_factor(), 1.0);
        assert_eq!(boost.wear_factor(), 1.0);
        assert!(!boost.is_configured());
    }

    #[test]
    fn test_from_complete_table() {
        let boost = BoostConfig::from_table(&boost_table()).unwrap();
        assert!(boost.is_configured());
        assert_eq!((boost.min, boost.step, boost.range, boost.index), (0, 1, 5, 2));
        assert_eq!(boost.actual_boost(), 2);
        assert_eq!(boost.coefficients.rpm, 0.1);
        assert_eq!(boost.coefficients.wear, 0.01);
        assert!((boost.torque_factor() - 1.1).abs() < 1e-12);
        assert!((boost.wear_factor() - 1.02).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_table_resets_to_neutral() {
        let mut table = DefinitionTable::new();
        for (key, value) in boost_table().iter() {
            if !key.eq_ignore_ascii_case(KEY_BOOST_POWER) {
                table.insert(key, value.clone());
            }
        }
        let mut boost = BoostConfig::new(1, 1, 3, 1, BoostCoefficients::default());
        boost.configure(&table).unwrap();
        assert_eq!(boost, BoostConfig::neutral());
    }

    #[test]
    fn test_wrong_shape_leaves_state_unchanged() {
        let mut table = boost_table();
        table.insert(KEY_BOOST_SETTING, Value::Text("high".to_string()));
        let original = BoostConfig::new(1, 1, 3, 1, BoostCoefficients::default());
        let mut boost = original;
        assert!(boost.configure(&table).is_err());
        assert_eq!(boost, original);
    }

    #[test]
    fn test_set_actual_boost_scans_ladder() {
        let mut boost = BoostConfig::new(0, 2, 3, 0, BoostCoefficients::default());
        boost.set_actual_boost(2).unwrap();
        assert_eq!(boost.index, 1);
        assert_eq!(
            boost.set_actual_boost(3),
            Err(BoostError::InvalidSetting { value: 3 })
        );
        assert_eq!(boost.index, 1);
        // Bound is the raw range value, so level 4 is never reached
        assert!(boost.set_actual_boost(4).is_err());
    }

    #[test]
    fn test_set_actual_boost_zero_step_does_not_loop() {
        let mut boost = BoostConfig::new(0, 0, 3, 0, BoostCoefficients::default());
        assert!(boost.set_actual_boost(0).is_ok());
        assert!(boost.set_actual_boost(1).is_err());
    }

    #[test]
    fn test_set_index_bounds() {
        let mut boost = BoostConfig::new(0, 1, 5, 0, BoostCoefficients::default());
        assert!(boost.set_index(4).is_ok());
        assert_eq!(
            boost.set_index(5),
            Err(BoostError::InvalidIndex { index: 5, range: 5 })
        );
        assert_eq!(boost.index, 4);
    }

    #[test]
    fn test_max_boost_values() {
        let boost = BoostConfig::new(2, 3, 4, 0, BoostCoefficients::default());
        assert_eq!(boost.max_boost(), 14.0);
        assert_eq!(boost.max_boost_setting(), 11);
    }

    #[test]
    fn test_overflowing_ladder_is_rejected() {
        let mut table = boost_table();
        table.insert(
            KEY_BOOST_RANGE,
            Value::NumberList(vec![2_000_000_000.0, 2_000_000_000.0, 5.0]),
        );
        table.insert(KEY_BOOST_SETTING, Value::Number(1.0));
        let original = BoostConfig::new(1, 1, 3, 1, BoostCoefficients::default());
        let mut boost = original;

        let err = boost.configure(&table).unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidValue { ref key, .. } if key == KEY_BOOST_SETTING));
        assert_eq!(boost, original);
    }

    #[test]
    fn test_ladder_integer_outside_i32_is_rejected() {
        let mut table = boost_table();
        table.insert(
            KEY_BOOST_RANGE,
            Value::NumberList(vec![0.0, 1.0, -3_000_000_000.0]),
        );
        let err = BoostConfig::from_table(&table).unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidValue { ref key, .. } if key == KEY_BOOST_RANGE));

        table.insert(KEY_BOOST_RANGE, Value::NumberList(vec![0.0, 1.0, f64::INFINITY]));
        assert!(BoostConfig::from_table(&table).is_err());
    }

    #[test]
    fn test_last_level_overflow_is_rejected() {
        let mut table = boost_table();
        table.insert(
            KEY_BOOST_RANGE,
            Value::NumberList(vec![0.0, 1_000_000_000.0, 5.0]),
        );
        table.insert(KEY_BOOST_SETTING, Value::Number(0.0));
        let err = BoostConfig::from_table(&table).unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidValue { ref key, .. } if key == KEY_BOOST_RANGE));
    }

    #[test]
    fn test_extreme_ladder_saturates() {
        let boost = BoostConfig::new(0, 1, i32::MIN, 0, BoostCoefficients::default());
        assert_eq!(boost.max_boost_setting(), i32::MIN);

        let boost = BoostConfig::new(i32::MAX, i32::MAX, 5, 3, BoostCoefficients::default());
        assert_eq!(boost.actual_boost(), i32::MAX);
        assert_eq!(boost.max_boost_setting(), i32::MAX);
    }

    #[test]
    fn test_set_actual_boost_near_i32_limits() {
        let mut boost = BoostConfig::new(i32::MAX - 3, 2, i32::MAX, 0, BoostCoefficients::default());
        boost.set_actual_boost(i32::MAX - 1).unwrap();
        assert_eq!(boost.index, 1);
        assert!(boost.set_actual_boost(i32::MAX).is_err());

        // Index would not fit in i32
        let mut boost = BoostConfig::new(i32::MIN, 1, i32::MAX, 0, BoostCoefficients::default());
        assert!(boost.set_actual_boost(i32::MAX - 1).is_err());
        assert_eq!(boost.index, 0);
        boost.set_actual_boost(-1).unwrap();
        assert_eq!(boost.index, i32::MAX);
    }
}
