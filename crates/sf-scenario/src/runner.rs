//! Scenario batch runner.

use rayon::prelude::*;
use sf_project::ScenarioDef;
use sf_results::ResultCache;
use sf_sim::{SimError, SimOptions, SimulationResult, run_simulation};
use sf_storm::StormSeries;
use tracing::{debug, info};

/// Engine version baked into run fingerprints; bumping the crate version
/// invalidates cached results.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// A storm paired with the label it is reported under (typically the
/// source file stem).
#[derive(Debug, Clone)]
pub struct NamedStorm {
    pub label: String,
    pub storm: StormSeries,
}

impl NamedStorm {
    pub fn new(label: impl Into<String>, storm: StormSeries) -> Self {
        Self {
            label: label.into(),
            storm,
        }
    }
}

/// Outcome of one (scenario, storm) combination. Failed runs keep their
/// error in place so sibling results stay usable.
#[derive(Debug)]
pub struct BatchEntry {
    pub scenario_id: String,
    pub storm_label: String,
    pub run_id: String,
    pub outcome: Result<SimulationResult, SimError>,
}

/// Run a single combination.
pub fn run_one(scenario: &ScenarioDef, storm: &NamedStorm, opts: &SimOptions) -> BatchEntry {
    let run_id = sf_results::compute_run_id(
        &scenario.structure,
        &storm.storm,
        opts,
        engine_version(),
    );
    info!(
        scenario = %scenario.id,
        storm = %storm.label,
        "running simulation"
    );
    let outcome = run_simulation(&storm.storm, &scenario.structure, opts);
    BatchEntry {
        scenario_id: scenario.id.clone(),
        storm_label: storm.label.clone(),
        run_id,
        outcome,
    }
}

/// Run every scenario against every storm, in parallel.
pub fn run_batch(
    scenarios: &[ScenarioDef],
    storms: &[NamedStorm],
    opts: &SimOptions,
) -> Vec<BatchEntry> {
    let pairs: Vec<(&ScenarioDef, &NamedStorm)> = scenarios
        .iter()
        .flat_map(|scenario| storms.iter().map(move |storm| (scenario, storm)))
        .collect();

    pairs
        .par_iter()
        .map(|(scenario, storm)| run_one(scenario, storm, opts))
        .collect()
}

/// Like `run_batch`, but consults a caller-owned result cache first and
/// inserts fresh successful results afterwards. Only misses are executed
/// (in parallel); entries come back in cross-product order regardless of
/// the hit/miss mix.
pub fn run_batch_cached(
    scenarios: &[ScenarioDef],
    storms: &[NamedStorm],
    opts: &SimOptions,
    cache: &mut ResultCache,
) -> Vec<BatchEntry> {
    let mut slots: Vec<Option<BatchEntry>> = Vec::with_capacity(scenarios.len() * storms.len());
    let mut misses: Vec<(usize, &ScenarioDef, &NamedStorm)> = Vec::new();

    for scenario in scenarios {
        for storm in storms {
            let run_id = sf_results::compute_run_id(
                &scenario.structure,
                &storm.storm,
                opts,
                engine_version(),
            );
            if let Some(result) = cache.get(&run_id) {
                debug!(scenario = %scenario.id, storm = %storm.label, "cache hit");
                slots.push(Some(BatchEntry {
                    scenario_id: scenario.id.clone(),
                    storm_label: storm.label.clone(),
                    run_id,
                    outcome: Ok(result.clone()),
                }));
            } else {
                misses.push((slots.len(), scenario, storm));
                slots.push(None);
            }
        }
    }

    let fresh: Vec<(usize, BatchEntry)> = misses
        .par_iter()
        .map(|(slot, scenario, storm)| (*slot, run_one(scenario, storm, opts)))
        .collect();

    for (slot, entry) in fresh {
        if let Ok(result) = &entry.outcome {
            cache.insert(entry.run_id.clone(), result.clone());
        }
        slots[slot] = Some(entry);
    }
    slots.into_iter().flatten().collect()
}
