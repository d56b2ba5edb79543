//! Axis ranges for displayed curves

use serde::{Deserialize, Serialize};

/// Which curves the chart currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveVisibility {
    /// Power curve
    pub power: bool,
    /// Torque curve
    pub torque: bool,
    /// Back-torque curve
    pub back_torque: bool,
    /// Fuel consumption curve
    pub fuel: bool,
}

impl Default for CurveVisibility {
    fn default() -> Self {
        Self {
            power: true,
            torque: true,
            back_torque: true,
            fuel: true,
        }
    }
}

/// A closed `[min, max]` interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl AxisRange {
    /// Smallest range covering all values, or `None` for no values
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(AxisRange { min: v, max: v }),
            Some(r) => Some(AxisRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// Smallest range covering both
    pub fn union(self, other: AxisRange) -> AxisRange {
        AxisRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Span of the range; zero for a collapsed range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen both ends by a tenth of the span
    pub fn padded(self) -> AxisRange {
        let pad = self.span() / 10.0;
        AxisRange {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// Display ranges for every chart axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisRanges {
    /// Horizontal rpm axis, unpadded
    pub rpm: AxisRange,
    /// Power axis
    pub power: AxisRange,
    /// Torque axis, shared by torque and back torque
    pub torque: AxisRange,
    /// Fuel consumption axis
    pub fuel: AxisRange,
}

/// Pad the union of the visible curves' ranges; zero range when none contribute
pub(crate) fn padded_union<I>(ranges: I) -> AxisRange
where
    I: IntoIterator<Item = Option<AxisRange>>,
{
    ranges
        .into_iter()
        .flatten()
        .reduce(AxisRange::union)
        .map(AxisRange::padded)
        .unwrap_or_default()
}
