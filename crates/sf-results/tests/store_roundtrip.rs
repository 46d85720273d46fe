use sf_results::{RunManifest, RunStore, compute_run_id};
use sf_sim::{SimOptions, run_simulation};
use sf_storm::StormSeries;
use sf_structures::StructureSpec;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    dir.push(format!("{prefix}_{nanos}"));
    dir
}

fn example_run() -> (String, RunManifest, sf_sim::SimulationResult) {
    let storm = StormSeries::from_pairs([(0.0, 0.0), (5.0, 0.002), (10.0, 0.0)]).unwrap();
    let spec = StructureSpec::soakwell(2.0, 2.0, 1e-4, 1.0);
    let opts = SimOptions::default();
    let result = run_simulation(&storm, &spec, &opts).unwrap();
    let run_id = compute_run_id(&spec, &storm, &opts, "0.1.0");
    let manifest = RunManifest::new(run_id.clone(), "test-well", "pulse", "0.1.0");
    (run_id, manifest, result)
}

#[test]
fn save_and_load_run() {
    let temp_dir = unique_temp_dir("sf_results_roundtrip");
    let store = RunStore::new(temp_dir.clone()).unwrap();

    let (run_id, manifest, result) = example_run();
    assert!(!store.has_run(&run_id));
    store.save_run(&manifest, &result).unwrap();
    assert!(store.has_run(&run_id));

    let loaded_manifest = store.load_manifest(&run_id).unwrap();
    assert_eq!(loaded_manifest.scenario_id, "test-well");

    let loaded_summary = store.load_summary(&run_id).unwrap();
    assert_eq!(loaded_summary, result.summary);

    let loaded_series = store.load_timeseries(&run_id).unwrap();
    assert_eq!(loaded_series, result.series);

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn list_runs_filters_by_scenario() {
    let temp_dir = unique_temp_dir("sf_results_list");
    let store = RunStore::new(temp_dir.clone()).unwrap();

    let (_, mut manifest_a, result) = example_run();
    manifest_a.run_id = "run_a".to_string();
    manifest_a.scenario_id = "well-a".to_string();
    store.save_run(&manifest_a, &result).unwrap();

    let mut manifest_b = manifest_a.clone();
    manifest_b.run_id = "run_b".to_string();
    manifest_b.scenario_id = "well-b".to_string();
    store.save_run(&manifest_b, &result).unwrap();

    assert_eq!(store.list_runs(None).unwrap().len(), 2);
    let filtered = store.list_runs(Some("well-a")).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].run_id, "run_a");

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn missing_run_is_reported() {
    let temp_dir = unique_temp_dir("sf_results_missing");
    let store = RunStore::new(temp_dir.clone()).unwrap();
    let err = store.load_manifest("nope").unwrap_err();
    assert!(err.to_string().contains("nope"));
    let _ = std::fs::remove_dir_all(&temp_dir);
}
