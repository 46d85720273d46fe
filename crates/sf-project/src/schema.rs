//! Scenario file schema definitions.

use serde::{Deserialize, Serialize};
use sf_sim::SimOptions;
use sf_structures::StructureSpec;
use std::path::Path;

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim: Option<SimOptionsDef>,
}

/// One named structure configuration to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub id: String,
    pub name: String,
    pub structure: StructureSpec,
}

/// Optional overrides for the simulator defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimOptionsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emptying_dt_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_epsilon_m3: Option<f64>,
}

impl SimOptionsDef {
    pub fn to_options(&self) -> SimOptions {
        let mut opts = SimOptions::default();
        if let Some(hours) = self.horizon_hours {
            opts.horizon_s = hours * 3600.0;
        }
        if let Some(dt) = self.emptying_dt_s {
            opts.emptying_dt_s = dt;
        }
        if let Some(eps) = self.empty_epsilon_m3 {
            opts.empty_epsilon_m3 = eps;
        }
        opts
    }
}

impl ScenarioFile {
    /// Simulation options for this file: overrides applied over defaults.
    pub fn sim_options(&self) -> SimOptions {
        self.sim
            .as_ref()
            .map(SimOptionsDef::to_options)
            .unwrap_or_default()
    }
}

/// Load and parse a scenario file; validation is a separate step.
pub fn load_scenario_file(path: &Path) -> crate::ProjectResult<ScenarioFile> {
    let content = std::fs::read_to_string(path)?;
    let file: ScenarioFile = serde_yaml::from_str(&content)?;
    Ok(file)
}
