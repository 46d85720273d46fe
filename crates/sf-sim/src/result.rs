//! Simulation output types.

use serde::{Deserialize, Serialize};

/// One recorded time step, at system scale (all parallel units combined).
/// `water_level_m` is the depth inside a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub time_min: f64,
    pub inflow_m3_per_s: f64,
    pub stored_volume_m3: f64,
    pub outflow_m3_per_s: f64,
    pub overflow_m3_per_s: f64,
    pub water_level_m: f64,
}

/// How the run left the emptying phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Emptying {
    /// Stored volume returned below the epsilon threshold; elapsed time
    /// from the peak-storage sample.
    Drained { minutes: f64 },
    /// The horizon elapsed with water still stored. A reportable condition,
    /// not an error.
    NotDrained { horizon_min: f64 },
    /// Storage never exceeded the epsilon threshold.
    Dry,
}

/// Mass-balance accounting identity, evaluated once per run.
///
/// `inflow = outflow + overflow + final storage + error`. Exceeding the
/// tolerance is a QA warning surfaced to the caller, never an exception.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassBalance {
    pub error_m3: f64,
    pub error_percent: f64,
    pub within_tolerance: bool,
}

/// French-drain conveyance diagnostics, constant per run. The pipe bounds
/// how fast inflow reaches the aggregate; it is not an outflow path and is
/// never subtracted from storage headroom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeDiagnostics {
    pub conveyance_capacity_m3_per_s: f64,
    pub perforation_intake_m3_per_s: f64,
}

/// Scalar summary of one run, at system scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub capacity_m3: f64,
    pub peak_storage_m3: f64,
    pub peak_storage_time_min: f64,
    /// peak storage / capacity, in [0, 1]
    pub storage_utilization: f64,
    pub total_inflow_m3: f64,
    pub total_outflow_m3: f64,
    pub total_overflow_m3: f64,
    pub final_stored_m3: f64,
    pub mass_balance: MassBalance,
    pub emptying: Emptying,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe: Option<PipeDiagnostics>,
}

/// Full output of one simulation run. Produced once per call; the engine
/// does not retain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub series: Vec<StepRecord>,
    pub summary: RunSummary,
}

impl SimulationResult {
    pub fn peak_overflow_m3_per_s(&self) -> f64 {
        self.series
            .iter()
            .map(|r| r.overflow_m3_per_s)
            .fold(0.0, f64::max)
    }
}
