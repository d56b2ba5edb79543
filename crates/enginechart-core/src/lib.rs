//! # EngineChart Core Library
//!
//! Core functionality for the EngineChart dyno viewer.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Engine definition file parsing (`RPMTorque` rows plus key/value data)
//! - Power and torque unit conversion (kW/PS/HP, N·m/kgf·m)
//! - Discrete boost ladder and its effect on the derived curves
//! - A sample series that tracks peak power/torque and chart axis ranges
//!
//! ## Example
//!
//! ```rust,ignore
//! use enginechart_core::prelude::*;
//!
//! let mut series = SampleSeries::new();
//! series.load_file("engine.ini")?;
//!
//! series.set_actual_boost(3)?;
//! println!("{}", series.max_power_summary().unwrap_or_default());
//! ```

pub mod boost;
pub mod definition;
pub mod sample;
pub mod series;
pub mod settings;
pub mod unit_conversion;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::boost::{BoostCoefficients, BoostConfig, BoostError};
    pub use crate::definition::{DefinitionError, DefinitionTable, EngineDefinition, Value};
    pub use crate::sample::{ModelContext, PerformanceSample};
    pub use crate::series::{
        AxisRange, AxisRanges, Curve, CurveVisibility, SampleSeries, SeriesEvent,
    };
    pub use crate::settings::ChartSettings;
    pub use crate::unit_conversion::{DisplayUnits, PowerUnit, TorqueUnit};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
