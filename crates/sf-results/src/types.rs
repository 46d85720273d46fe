//! Result metadata types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Metadata describing one stored simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_id: String,
    pub storm_label: String,
    pub timestamp: String,
    pub engine_version: String,
}

impl RunManifest {
    pub fn new(
        run_id: RunId,
        scenario_id: impl Into<String>,
        storm_label: impl Into<String>,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            scenario_id: scenario_id.into(),
            storm_label: storm_label.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            engine_version: engine_version.into(),
        }
    }
}
