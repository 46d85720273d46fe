//! Water-balance stepping loop.

use crate::error::{SimError, SimResult};
use crate::result::{
    Emptying, MassBalance, PipeDiagnostics, RunSummary, SimulationResult, StepRecord,
};
use serde::Serialize;
use sf_core::constants::SECONDS_PER_MINUTE;
use sf_core::{ensure_finite, relative_percent};
use sf_core::units::m3;
use sf_storm::StormSeries;
use sf_structures::{GeometryKind, StructureSpec, geometry, infiltration};
use tracing::{debug, warn};

/// Options for simulation runs.
#[derive(Clone, Debug, Serialize)]
pub struct SimOptions {
    /// Fixed step for the post-storm emptying extension (seconds)
    pub emptying_dt_s: f64,
    /// Total simulated-time horizon measured from the first sample (seconds)
    pub horizon_s: f64,
    /// Stored volume below which the structure counts as empty (m³)
    pub empty_epsilon_m3: f64,
    /// Mass-balance QA threshold, relative to total inflow (percent)
    pub mass_balance_tolerance_percent: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            emptying_dt_s: 60.0,
            horizon_s: 24.0 * 3600.0,
            empty_epsilon_m3: 1e-3,
            mass_balance_tolerance_percent: 1.0,
        }
    }
}

impl SimOptions {
    pub fn with_horizon_hours(mut self, hours: f64) -> Self {
        self.horizon_s = hours * 3600.0;
        self
    }

    fn validate(&self) -> SimResult<()> {
        if !(self.emptying_dt_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "emptying_dt_s must be positive",
            });
        }
        if !(self.horizon_s >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "horizon_s must be non-negative",
            });
        }
        if !(self.empty_epsilon_m3 > 0.0) {
            return Err(SimError::InvalidArg {
                what: "empty_epsilon_m3 must be positive",
            });
        }
        Ok(())
    }
}

/// Mutable accounting state for one run. Created dry at t = 0, discarded
/// when the run completes.
struct BalanceState {
    stored_m3: f64,
    cumulative_inflow_m3: f64,
    cumulative_outflow_m3: f64,
    cumulative_overflow_m3: f64,
}

/// Integrate the water balance of one structure over a storm plus its
/// emptying tail.
///
/// Per step: inflow from the hydrograph (zero after it ends), outflow
/// limited by both the soil's infiltration capacity and the stored volume,
/// excess above the storage capacity shed as overflow. Parallel units split
/// the inflow evenly; capacity terms scale symmetrically, so the recorded
/// series is the system total and `water_level_m` is per unit.
pub fn run_simulation(
    storm: &StormSeries,
    spec: &StructureSpec,
    opts: &SimOptions,
) -> SimResult<SimulationResult> {
    spec.validate()?;
    opts.validate()?;

    let units = f64::from(spec.num_units);
    let capacity_m3 = units * geometry::capacity_volume(spec).value;
    let samples = storm.samples();
    let t0_min = samples[0].time_min;

    let mut state = BalanceState {
        stored_m3: 0.0,
        cumulative_inflow_m3: 0.0,
        cumulative_outflow_m3: 0.0,
        cumulative_overflow_m3: 0.0,
    };

    let mut series = Vec::with_capacity(samples.len());
    series.push(StepRecord {
        time_min: t0_min,
        inflow_m3_per_s: samples[0].flow_m3_per_s,
        stored_volume_m3: 0.0,
        outflow_m3_per_s: 0.0,
        overflow_m3_per_s: 0.0,
        water_level_m: 0.0,
    });

    // Recorded storm window: step sizes come from the hydrograph's own
    // spacing, with the rate at sample i applied over (t[i-1], t[i]].
    for window in samples.windows(2) {
        let dt_s = (window[1].time_min - window[0].time_min) * SECONDS_PER_MINUTE;
        let record = advance(
            spec,
            &mut state,
            capacity_m3,
            window[1].time_min,
            dt_s,
            window[1].flow_m3_per_s,
        )?;
        series.push(record);
    }

    // Emptying extension: zero inflow at a fixed step until the structure
    // drains or the horizon elapses.
    let emptying_dt_min = opts.emptying_dt_s / SECONDS_PER_MINUTE;
    let horizon_min = opts.horizon_s / SECONDS_PER_MINUTE;
    let mut t_min = samples[samples.len() - 1].time_min;
    while t_min - t0_min < horizon_min && state.stored_m3 >= opts.empty_epsilon_m3 {
        t_min += emptying_dt_min;
        let record = advance(spec, &mut state, capacity_m3, t_min, opts.emptying_dt_s, 0.0)?;
        series.push(record);
    }

    let summary = summarize(spec, opts, &state, &series, capacity_m3, horizon_min);
    debug!(
        total_inflow_m3 = summary.total_inflow_m3,
        total_outflow_m3 = summary.total_outflow_m3,
        total_overflow_m3 = summary.total_overflow_m3,
        peak_storage_m3 = summary.peak_storage_m3,
        "run complete"
    );
    Ok(SimulationResult { series, summary })
}

/// One explicit step of the coupled balance
/// `d(volume)/dt = inflow − outflow − overflow`.
fn advance(
    spec: &StructureSpec,
    state: &mut BalanceState,
    capacity_m3: f64,
    t_min: f64,
    dt_s: f64,
    inflow_m3_per_s: f64,
) -> SimResult<StepRecord> {
    let units = f64::from(spec.num_units);

    // Depth and capacity are per-unit quantities; each unit sees an even
    // share of the stored water, so the system capacity is units * per-unit.
    let depth = geometry::water_depth(spec, m3(state.stored_m3 / units));
    let outflow_capacity = units * infiltration::infiltration_capacity(spec, depth).value;

    // Outflow can never drain more than is currently stored.
    let outflow = outflow_capacity.min(state.stored_m3 / dt_s);

    let mut tentative = ensure_finite(
        state.stored_m3 + dt_s * (inflow_m3_per_s - outflow),
        "stored volume",
    )
    .map_err(|_| SimError::NonFinite {
        what: "stored volume",
        time_min: t_min,
    })?;

    // Excess above capacity is overflow: permanently lost, accounted at the
    // clamp boundary so the balance identity holds exactly.
    let mut overflow_rate = 0.0;
    if tentative > capacity_m3 {
        overflow_rate = (tentative - capacity_m3) / dt_s;
        tentative = capacity_m3;
    }
    // Outflow was clamped above, so a negative here is floating-point step
    // error only.
    if tentative < 0.0 {
        tentative = 0.0;
    }

    state.stored_m3 = tentative;
    state.cumulative_inflow_m3 += inflow_m3_per_s * dt_s;
    state.cumulative_outflow_m3 += outflow * dt_s;
    state.cumulative_overflow_m3 += overflow_rate * dt_s;

    Ok(StepRecord {
        time_min: t_min,
        inflow_m3_per_s,
        stored_volume_m3: state.stored_m3,
        outflow_m3_per_s: outflow,
        overflow_m3_per_s: overflow_rate,
        water_level_m: geometry::water_depth(spec, m3(state.stored_m3 / units)).value,
    })
}

fn summarize(
    spec: &StructureSpec,
    opts: &SimOptions,
    state: &BalanceState,
    series: &[StepRecord],
    capacity_m3: f64,
    horizon_min: f64,
) -> RunSummary {
    let (peak_idx, peak) = series
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.stored_volume_m3.total_cmp(&b.stored_volume_m3))
        .map(|(i, r)| (i, *r))
        .unwrap_or((0, series[0]));

    let emptying = if peak.stored_volume_m3 < opts.empty_epsilon_m3 {
        Emptying::Dry
    } else {
        series[peak_idx..]
            .iter()
            .find(|r| r.stored_volume_m3 < opts.empty_epsilon_m3)
            .map(|r| Emptying::Drained {
                minutes: r.time_min - peak.time_min,
            })
            .unwrap_or(Emptying::NotDrained { horizon_min })
    };

    let error_m3 = state.cumulative_inflow_m3
        - (state.cumulative_outflow_m3 + state.cumulative_overflow_m3 + state.stored_m3);
    let error_percent = relative_percent(error_m3.abs(), state.cumulative_inflow_m3);
    let within_tolerance = error_percent <= opts.mass_balance_tolerance_percent;
    if !within_tolerance {
        warn!(
            error_percent,
            tolerance = opts.mass_balance_tolerance_percent,
            "mass-balance error exceeds tolerance"
        );
    }

    let pipe = match &spec.geometry {
        GeometryKind::Cylinder { .. } => None,
        GeometryKind::LinearTrench {
            length_m,
            trench_depth_m,
            pipe,
            ..
        } => {
            let units = f64::from(spec.num_units);
            Some(PipeDiagnostics {
                conveyance_capacity_m3_per_s: units
                    * infiltration::pipe_conveyance_capacity(pipe).value,
                perforation_intake_m3_per_s: units
                    * infiltration::perforation_intake_capacity(pipe, *length_m, *trench_depth_m)
                        .value,
            })
        }
    };

    RunSummary {
        capacity_m3,
        peak_storage_m3: peak.stored_volume_m3,
        peak_storage_time_min: peak.time_min,
        storage_utilization: if capacity_m3 > 0.0 {
            peak.stored_volume_m3 / capacity_m3
        } else {
            0.0
        },
        total_inflow_m3: state.cumulative_inflow_m3,
        total_outflow_m3: state.cumulative_outflow_m3,
        total_overflow_m3: state.cumulative_overflow_m3,
        final_stored_m3: state.stored_m3,
        mass_balance: MassBalance {
            error_m3,
            error_percent,
            within_tolerance,
        },
        emptying,
        pipe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_storm::StormSeries;

    fn small_well() -> StructureSpec {
        StructureSpec::soakwell(1.8, 1.8, 1e-5, 1.0)
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.emptying_dt_s, 60.0);
        assert_eq!(opts.horizon_s, 86_400.0);
        assert_eq!(opts.empty_epsilon_m3, 1e-3);
        assert_eq!(opts.mass_balance_tolerance_percent, 1.0);
    }

    #[test]
    fn rejects_invalid_options() {
        let storm = StormSeries::from_pairs([(0.0, 0.0), (1.0, 0.001)]).unwrap();
        let opts = SimOptions {
            emptying_dt_s: 0.0,
            ..SimOptions::default()
        };
        let err = run_simulation(&storm, &small_well(), &opts).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn rejects_invalid_spec_before_stepping() {
        let storm = StormSeries::from_pairs([(0.0, 0.0), (1.0, 0.001)]).unwrap();
        let spec = StructureSpec::soakwell(-2.0, 2.0, 1e-5, 1.0);
        let err = run_simulation(&storm, &spec, &SimOptions::default()).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn non_finite_step_aborts_the_run() {
        // Finite but astronomically large inflow overflows the volume update.
        let storm = StormSeries::from_pairs([(0.0, 0.0), (1.0, f64::MAX)]).unwrap();
        let err = run_simulation(&storm, &small_well(), &SimOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SimError::NonFinite {
                what: "stored volume",
                ..
            }
        ));
    }

    #[test]
    fn dry_start_first_record_is_zero() {
        let storm = StormSeries::from_pairs([(0.0, 0.005), (1.0, 0.005)]).unwrap();
        let result = run_simulation(&storm, &small_well(), &SimOptions::default()).unwrap();
        let first = result.series[0];
        assert_eq!(first.stored_volume_m3, 0.0);
        assert_eq!(first.outflow_m3_per_s, 0.0);
        assert_eq!(first.water_level_m, 0.0);
    }

    #[test]
    fn soakwell_has_no_pipe_diagnostics() {
        let storm = StormSeries::from_pairs([(0.0, 0.0), (1.0, 0.001)]).unwrap();
        let result = run_simulation(&storm, &small_well(), &SimOptions::default()).unwrap();
        assert!(result.summary.pipe.is_none());
    }
}
