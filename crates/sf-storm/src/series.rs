//! Validated hydrograph time series.

use crate::error::{StormError, StormResult};
use serde::Serialize;
use sf_core::constants::SECONDS_PER_MINUTE;

/// One hydrograph sample: elapsed storm time and volumetric inflow rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StormSample {
    pub time_min: f64,
    pub flow_m3_per_s: f64,
}

/// Ordered storm inflow record.
///
/// Immutable once constructed; `new` enforces the invariants the simulator
/// assumes (strictly increasing time, finite non-negative flows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormSeries {
    samples: Vec<StormSample>,
}

impl StormSeries {
    pub fn new(samples: Vec<StormSample>) -> StormResult<Self> {
        if samples.is_empty() {
            return Err(StormError::Empty);
        }
        for (index, sample) in samples.iter().enumerate() {
            if !sample.time_min.is_finite() {
                return Err(StormError::NonFinite { what: "time", index });
            }
            if !sample.flow_m3_per_s.is_finite() {
                return Err(StormError::NonFinite { what: "flow", index });
            }
            if sample.flow_m3_per_s < 0.0 {
                return Err(StormError::NegativeFlow { index });
            }
            if index > 0 && sample.time_min <= samples[index - 1].time_min {
                return Err(StormError::TimeNotIncreasing { index });
            }
        }
        Ok(Self { samples })
    }

    pub fn from_pairs<I>(pairs: I) -> StormResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(time_min, flow_m3_per_s)| StormSample {
                    time_min,
                    flow_m3_per_s,
                })
                .collect(),
        )
    }

    pub fn samples(&self) -> &[StormSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elapsed time covered by the recorded samples, in minutes.
    pub fn duration_min(&self) -> f64 {
        self.samples[self.samples.len() - 1].time_min - self.samples[0].time_min
    }

    pub fn peak_flow_m3_per_s(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.flow_m3_per_s)
            .fold(0.0, f64::max)
    }

    /// Total inflow volume under the hydrograph, in m³.
    ///
    /// Rectangle rule with the rate at sample i applied over (t[i-1], t[i]],
    /// matching the simulator's own accounting so the two totals agree.
    pub fn total_volume_m3(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| w[1].flow_m3_per_s * (w[1].time_min - w[0].time_min) * SECONDS_PER_MINUTE)
            .sum()
    }
}
