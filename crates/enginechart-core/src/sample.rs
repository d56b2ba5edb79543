//! Performance sample model
//!
//! One dyno row. Only rpm, torque and back torque are stored; every other
//! figure is computed on request from the [`ModelContext`] it is read through.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::boost::BoostConfig;
use crate::unit_conversion::{DisplayUnits, TorqueUnit};

/// Shared inputs for every derived figure of a series
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelContext {
    /// Active boost ladder and level
    pub boost: BoostConfig,
    /// Active display units
    pub units: DisplayUnits,
    /// `FuelConsumption` scalar from the definition (0 when absent)
    pub fuel_consumption: f64,
}

/// A single RPM row of dyno data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    rpm: f64,
    torque_nm: f64,
    back_torque_nm: f64,
}

impl PerformanceSample {
    /// Create a sample from raw newton-metre figures
    pub fn new(rpm: f64, torque_nm: f64, back_torque_nm: f64) -> Self {
        Self {
            rpm,
            torque_nm,
            back_torque_nm,
        }
    }

    /// Engine speed
    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Stored torque before boost, N·m
    pub fn raw_torque_nm(&self) -> f64 {
        self.torque_nm
    }

    /// Stored back torque, N·m
    pub fn raw_back_torque_nm(&self) -> f64 {
        self.back_torque_nm
    }

    /// Boost-adjusted torque in N·m
    pub fn torque_nm(&self, ctx: &ModelContext) -> f64 {
        self.torque_nm * ctx.boost.torque_factor()
    }

    /// Back torque in N·m (boost does not apply)
    pub fn back_torque_nm(&self, _ctx: &ModelContext) -> f64 {
        self.back_torque_nm
    }

    /// Boost-adjusted power in kW
    ///
    /// With a configured boost ladder the angular velocity term uses
    /// `rpm + (1 + boost * rpm_coeff)`, an additive offset rather than a scale.
    pub fn power_kw(&self, ctx: &ModelContext) -> f64 {
        let rpm = if ctx.boost.is_configured() {
            self.rpm + ctx.boost.rpm_offset()
        } else {
            self.rpm
        };
        let omega = rpm * (PI * 2.0) / 60.0;
        self.torque_nm(ctx) * omega / 1000.0 * ctx.boost.power_factor()
    }

    /// Fuel consumption at this row
    pub fn fuel_consumption(&self, ctx: &ModelContext) -> f64 {
        ctx.fuel_consumption * self.power_kw(ctx) * ctx.boost.fuel_factor()
    }

    /// Power in the active power unit
    pub fn power(&self, ctx: &ModelContext) -> f64 {
        ctx.units.power.from_kw(self.power_kw(ctx))
    }

    /// Torque in the active torque unit
    pub fn torque(&self, ctx: &ModelContext) -> f64 {
        ctx.units.torque.from_nm(self.torque_nm(ctx))
    }

    /// Back torque in the active torque unit
    pub fn back_torque(&self, ctx: &ModelContext) -> f64 {
        ctx.units.torque.from_nm(self.back_torque_nm(ctx))
    }

    /// Store a torque given in `unit`
    pub fn set_torque(&mut self, value: f64, unit: TorqueUnit) {
        self.torque_nm = unit.to_nm(value);
    }

    /// Store a back torque given in `unit`
    pub fn set_back_torque(&mut self, value: f64, unit: TorqueUnit) {
        self.back_torque_nm = unit.to_nm(value);
    }
}
