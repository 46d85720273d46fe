//! Content-based hashing for run IDs.
//!
//! A run is identified by the inputs that determine its result: structure
//! spec, storm samples, simulation options, and the engine version. Equal
//! inputs always hash to the same ID, so the cache and the store can treat
//! the ID as a fingerprint.

use sha2::{Digest, Sha256};
use sf_sim::SimOptions;
use sf_storm::StormSeries;
use sf_structures::StructureSpec;

pub fn compute_run_id(
    spec: &StructureSpec,
    storm: &StormSeries,
    opts: &SimOptions,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let spec_json = serde_json::to_string(spec).unwrap_or_default();
    hasher.update(spec_json.as_bytes());

    let storm_json = serde_json::to_string(storm).unwrap_or_default();
    hasher.update(storm_json.as_bytes());

    let opts_json = serde_json::to_string(opts).unwrap_or_default();
    hasher.update(opts_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{result:x}")
}
