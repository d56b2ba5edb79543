//! Unit Conversion Functions
//!
//! Provides conversion functions for dyno chart figures:
//! - Power: kW ↔ PS (metric horsepower) ↔ HP (mechanical horsepower)
//! - Torque: N·m ↔ kgf·m
//!
//! No rounding is applied here; rounding is left to whoever formats the value.

use serde::{Deserialize, Serialize};

/// kW → PS factor
pub const KW_TO_PS: f64 = 1.3596;

/// kW → HP factor
pub const KW_TO_HP: f64 = 1.341;

/// N·m → kgf·m factor
pub const NM_TO_KGM: f64 = 0.10197;

/// Convert kW to PS
pub fn kw_to_ps(kw: f64) -> f64 {
    kw * KW_TO_PS
}

/// Convert PS to kW
pub fn ps_to_kw(ps: f64) -> f64 {
    ps / KW_TO_PS
}

/// Convert kW to HP
pub fn kw_to_hp(kw: f64) -> f64 {
    kw * KW_TO_HP
}

/// Convert HP to kW
pub fn hp_to_kw(hp: f64) -> f64 {
    hp / KW_TO_HP
}

/// Convert N·m to kgf·m
pub fn nm_to_kgm(nm: f64) -> f64 {
    nm * NM_TO_KGM
}

/// Convert kgf·m to N·m
pub fn kgm_to_nm(kgm: f64) -> f64 {
    kgm / NM_TO_KGM
}

/// Display unit for power curves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUnit {
    /// Kilowatts (canonical)
    #[default]
    #[serde(rename = "KW")]
    Kw,
    /// Metric horsepower
    #[serde(rename = "PS")]
    Ps,
    /// Mechanical horsepower
    #[serde(rename = "HP")]
    Hp,
}

impl PowerUnit {
    /// Project a kW value into this unit
    pub fn from_kw(self, kw: f64) -> f64 {
        match self {
            PowerUnit::Kw => kw,
            PowerUnit::Ps => kw_to_ps(kw),
            PowerUnit::Hp => kw_to_hp(kw),
        }
    }

    /// Convert a value in this unit back to kW
    pub fn to_kw(self, value: f64) -> f64 {
        match self {
            PowerUnit::Kw => value,
            PowerUnit::Ps => ps_to_kw(value),
            PowerUnit::Hp => hp_to_kw(value),
        }
    }

    /// Short label as shown on chart axes
    pub fn label(self) -> &'static str {
        match self {
            PowerUnit::Kw => "KW",
            PowerUnit::Ps => "PS",
            PowerUnit::Hp => "HP",
        }
    }
}

/// Display unit for torque curves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TorqueUnit {
    /// Newton-metres (canonical)
    #[default]
    #[serde(rename = "Nm")]
    Nm,
    /// Kilogram-force metres
    #[serde(rename = "Kgm")]
    Kgm,
}

impl TorqueUnit {
    /// Project an N·m value into this unit
    pub fn from_nm(self, nm: f64) -> f64 {
        match self {
            TorqueUnit::Nm => nm,
            TorqueUnit::Kgm => nm_to_kgm(nm),
        }
    }

    /// Convert a value in this unit back to N·m
    pub fn to_nm(self, value: f64) -> f64 {
        match self {
            TorqueUnit::Nm => value,
            TorqueUnit::Kgm => kgm_to_nm(value),
        }
    }

    /// Short label as shown on chart axes
    pub fn label(self) -> &'static str {
        match self {
            TorqueUnit::Nm => "Nm",
            TorqueUnit::Kgm => "Kgm",
        }
    }
}

/// Active unit system for displayed curves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    /// Unit for the power curve
    pub power: PowerUnit,
    /// Unit for the torque and back-torque curves
    pub torque: TorqueUnit,
}
