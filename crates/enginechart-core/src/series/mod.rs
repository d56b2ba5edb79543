//! Sample series
//!
//! Owns the loaded samples, the generic table and the single boost/unit
//! context every sample is evaluated through. Any mutation runs a
//! recomputation pass (extrema and axis ranges) and then notifies observers.
//!
//! ```text
//!  definition file
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ EngineDefinition│  table + samples
//!   └────────────────┘
//!        │ load
//!        ▼
//!   ┌──────────────┐      ┌─────────────┐
//!   │ SampleSeries │ ───▶ │ ModelContext│  boost, units, fuel
//!   └──────────────┘      └─────────────┘
//!        │ recompute
//!        ▼
//!   max power / max torque, AxisRanges, SeriesEvent
//! ```

mod observer;
mod range;
mod summary;

pub use observer::{ObserverId, SeriesEvent};
pub use range::{AxisRange, AxisRanges, CurveVisibility};
pub use summary::{format_max_power, format_max_torque};

use std::path::Path;

use observer::Observers;
use range::padded_union;

use crate::boost::{BoostCoefficients, BoostConfig, BoostError};
use crate::definition::{read_definition_file, DefinitionError, DefinitionTable, EngineDefinition};
use crate::sample::{ModelContext, PerformanceSample};
use crate::settings::ChartSettings;
use crate::unit_conversion::DisplayUnits;

/// Table key of the base fuel consumption figure
pub const KEY_FUEL_CONSUMPTION: &str = "FuelConsumption";

/// A drawable curve of the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Power in the active power unit
    Power,
    /// Boost-adjusted torque in the active torque unit
    Torque,
    /// Back torque in the active torque unit
    BackTorque,
    /// Fuel consumption
    Fuel,
}

impl Curve {
    /// Value of this curve for one sample, in the active units
    pub fn value(self, sample: &PerformanceSample, ctx: &ModelContext) -> f64 {
        match self {
            Curve::Power => sample.power(ctx),
            Curve::Torque => sample.torque(ctx),
            Curve::BackTorque => sample.back_torque(ctx),
            Curve::Fuel => sample.fuel_consumption(ctx),
        }
    }
}

/// Ordered dyno samples plus the context they are evaluated in
#[derive(Debug, Default)]
pub struct SampleSeries {
    samples: Vec<PerformanceSample>,
    table: DefinitionTable,
    ctx: ModelContext,
    visibility: CurveVisibility,
    source_name: Option<String>,
    max_power: Option<usize>,
    max_torque: Option<usize>,
    ranges: AxisRanges,
    observers: Observers,
}

impl SampleSeries {
    /// Create an empty series with neutral boost and default units
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty series using the given display settings
    pub fn with_settings(settings: &ChartSettings) -> Self {
        let mut series = Self::new();
        series.ctx.units = settings.units;
        series.visibility = settings.visibility;
        series
    }

    /// Replace the series with the contents of a definition file
    ///
    /// An unreadable file leaves the series untouched. A file that fails to
    /// parse leaves the series empty.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DefinitionError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading engine definition");

        let content = read_definition_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        self.load_str(&content, name)
    }

    /// Replace the series with definition text
    pub fn load_str(&mut self, content: &str, source_name: Option<String>) -> Result<(), DefinitionError> {
        self.reset();
        let result = EngineDefinition::from_str(content).and_then(|def| self.adopt(def));
        match result {
            Ok(()) => {
                self.source_name = source_name;
                self.recompute();
                tracing::info!(
                    samples = self.samples.len(),
                    keys = self.table.len(),
                    boost = self.ctx.boost.actual_boost(),
                    "engine definition loaded"
                );
                self.observers.notify(SeriesEvent::Replaced);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "engine definition rejected, series cleared");
                self.reset();
                self.observers.notify(SeriesEvent::Cleared);
                Err(e)
            }
        }
    }

    /// Replace the series with an already parsed definition
    pub fn load_definition(&mut self, definition: EngineDefinition) -> Result<(), DefinitionError> {
        self.reset();
        if let Err(e) = self.adopt(definition) {
            self.reset();
            self.observers.notify(SeriesEvent::Cleared);
            return Err(e);
        }
        self.recompute();
        self.observers.notify(SeriesEvent::Replaced);
        Ok(())
    }

    fn adopt(&mut self, definition: EngineDefinition) -> Result<(), DefinitionError> {
        let boost = BoostConfig::from_table(&definition.table)?;
        let fuel_consumption = if definition.table.contains_key(KEY_FUEL_CONSUMPTION) {
            definition.table.number(KEY_FUEL_CONSUMPTION)?
        } else {
            0.0
        };

        self.ctx.boost = boost;
        self.ctx.fuel_consumption = fuel_consumption;
        self.table = definition.table;
        self.samples = definition.samples;
        Ok(())
    }

    /// Drop samples, table and boost state without notifying
    fn reset(&mut self) {
        self.samples.clear();
        self.table = DefinitionTable::new();
        self.ctx.boost = BoostConfig::neutral();
        self.ctx.fuel_consumption = 0.0;
        self.source_name = None;
        self.recompute();
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in insertion order
    pub fn samples(&self) -> &[PerformanceSample] {
        &self.samples
    }

    /// Iterate over samples in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, PerformanceSample> {
        self.samples.iter()
    }

    /// Sample at `index`
    pub fn get(&self, index: usize) -> Option<&PerformanceSample> {
        self.samples.get(index)
    }

    /// Append a sample
    pub fn push(&mut self, sample: PerformanceSample) {
        self.samples.push(sample);
        self.recompute();
        self.observers
            .notify(SeriesEvent::SampleAdded(self.samples.len() - 1));
    }

    /// Remove and return the sample at `index`
    pub fn remove(&mut self, index: usize) -> Option<PerformanceSample> {
        if index >= self.samples.len() {
            return None;
        }
        let sample = self.samples.remove(index);
        self.recompute();
        self.observers.notify(SeriesEvent::SampleRemoved(index));
        Some(sample)
    }

    /// Remove all samples. Table and boost state are kept.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.recompute();
        self.observers.notify(SeriesEvent::Cleared);
    }

    /// Set a sample's torque, given in the active torque unit
    pub fn set_torque(&mut self, index: usize, value: f64) -> bool {
        let unit = self.ctx.units.torque;
        let Some(sample) = self.samples.get_mut(index) else {
            return false;
        };
        sample.set_torque(value, unit);
        self.recompute();
        self.observers.notify(SeriesEvent::SampleChanged(index));
        true
    }

    /// Set a sample's back torque, given in the active torque unit
    pub fn set_back_torque(&mut self, index: usize, value: f64) -> bool {
        let unit = self.ctx.units.torque;
        let Some(sample) = self.samples.get_mut(index) else {
            return false;
        };
        sample.set_back_torque(value, unit);
        self.recompute();
        self.observers.notify(SeriesEvent::SampleChanged(index));
        true
    }

    /// Generic key/value data of the loaded file
    pub fn table(&self) -> &DefinitionTable {
        &self.table
    }

    /// File name of the last successful load
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Boost, unit and fuel inputs shared by all samples
    pub fn context(&self) -> &ModelContext {
        &self.ctx
    }

    /// Active boost configuration
    pub fn boost(&self) -> &BoostConfig {
        &self.ctx.boost
    }

    /// Active display units
    pub fn units(&self) -> DisplayUnits {
        self.ctx.units
    }

    /// Curve visibility flags
    pub fn visibility(&self) -> CurveVisibility {
        self.visibility
    }

    /// Values of one curve as `(rpm, value)` points
    pub fn points(&self, curve: Curve) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.rpm(), curve.value(s, &self.ctx)))
            .collect()
    }

    /// Replace the whole boost configuration
    pub fn set_boost(&mut self, boost: BoostConfig) {
        if self.ctx.boost == boost {
            return;
        }
        self.ctx.boost = boost;
        self.boost_changed();
    }

    /// Select a boost level by index
    pub fn set_boost_index(&mut self, index: i32) -> Result<(), BoostError> {
        self.ctx.boost.set_index(index)?;
        self.boost_changed();
        Ok(())
    }

    /// Select the boost level whose value is `value`
    pub fn set_actual_boost(&mut self, value: i32) -> Result<(), BoostError> {
        self.ctx.boost.set_actual_boost(value)?;
        self.boost_changed();
        Ok(())
    }

    /// Set the first level value
    pub fn set_boost_min(&mut self, min: i32) {
        if self.ctx.boost.min != min {
            self.ctx.boost.min = min;
            self.boost_changed();
        }
    }

    /// Set the distance between levels
    pub fn set_boost_step(&mut self, step: i32) {
        if self.ctx.boost.step != step {
            self.ctx.boost.step = step;
            self.boost_changed();
        }
    }

    /// Set the number of levels
    pub fn set_boost_range(&mut self, range: i32) {
        if self.ctx.boost.range != range {
            self.ctx.boost.range = range;
            self.boost_changed();
        }
    }

    /// Set the curve coefficients
    pub fn set_boost_coefficients(&mut self, coefficients: BoostCoefficients) {
        if self.ctx.boost.coefficients != coefficients {
            self.ctx.boost.coefficients = coefficients;
            self.boost_changed();
        }
    }

    fn boost_changed(&mut self) {
        tracing::debug!(boost = self.ctx.boost.actual_boost(), "boost changed");
        self.recompute();
        self.observers.notify(SeriesEvent::BoostChanged);
    }

    /// Change the display units
    pub fn set_units(&mut self, units: DisplayUnits) {
        if self.ctx.units != units {
            self.ctx.units = units;
            self.settings_changed();
        }
    }

    /// Change which curves contribute to the axis ranges
    pub fn set_visibility(&mut self, visibility: CurveVisibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.settings_changed();
        }
    }

    /// Apply units and visibility from settings
    pub fn apply_settings(&mut self, settings: &ChartSettings) {
        if self.ctx.units != settings.units || self.visibility != settings.visibility {
            self.ctx.units = settings.units;
            self.visibility = settings.visibility;
            self.settings_changed();
        }
    }

    fn settings_changed(&mut self) {
        self.recompute();
        self.observers.notify(SeriesEvent::SettingsChanged);
    }

    /// Sample with the greatest power under current settings
    pub fn max_power(&self) -> Option<&PerformanceSample> {
        self.max_power.and_then(|i| self.samples.get(i))
    }

    /// Sample with the greatest torque under current settings
    pub fn max_torque(&self) -> Option<&PerformanceSample> {
        self.max_torque.and_then(|i| self.samples.get(i))
    }

    /// Summary line for the max power sample
    pub fn max_power_summary(&self) -> Option<String> {
        self.max_power().map(|s| format_max_power(s, &self.ctx))
    }

    /// Summary line for the max torque sample
    pub fn max_torque_summary(&self) -> Option<String> {
        self.max_torque().map(|s| format_max_torque(s, &self.ctx))
    }

    /// Padded display ranges of every axis
    pub fn ranges(&self) -> AxisRanges {
        self.ranges
    }

    fn recompute(&mut self) {
        self.max_power = self.last_max(Curve::Power);
        self.max_torque = self.last_max(Curve::Torque);

        let vis = self.visibility;
        let curve_range = |curve: Curve, visible: bool| {
            if visible {
                AxisRange::from_values(self.samples.iter().map(|s| curve.value(s, &self.ctx)))
            } else {
                None
            }
        };

        self.ranges = AxisRanges {
            rpm: AxisRange::from_values(self.samples.iter().map(|s| s.rpm())).unwrap_or_default(),
            power: padded_union([curve_range(Curve::Power, vis.power)]),
            torque: padded_union([
                curve_range(Curve::Torque, vis.torque),
                curve_range(Curve::BackTorque, vis.back_torque),
            ]),
            fuel: padded_union([curve_range(Curve::Fuel, vis.fuel)]),
        };
    }

    /// Index of the greatest value; ties go to the later sample
    fn last_max(&self, curve: Curve) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, sample) in self.samples.iter().enumerate() {
            let value = curve.value(sample, &self.ctx);
            match best {
                Some((_, b)) if value < b => {}
                _ => best = Some((i, value)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Register a callback for series changes
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(SeriesEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}
