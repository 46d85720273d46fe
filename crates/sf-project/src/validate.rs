//! Scenario file validation logic.

use crate::schema::{LATEST_VERSION, ScenarioFile};
use sf_structures::StructureError;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Duplicate scenario id: {id}")]
    DuplicateId { id: String },

    #[error("Scenario '{id}': {source}")]
    Structure {
        id: String,
        #[source]
        source: StructureError,
    },

    #[error("Scenario file contains no scenarios")]
    Empty,
}

pub fn validate_scenario_file(file: &ScenarioFile) -> Result<(), ValidationError> {
    if file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }
    if file.scenarios.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut ids = HashSet::new();
    for scenario in &file.scenarios {
        if !ids.insert(&scenario.id) {
            return Err(ValidationError::DuplicateId {
                id: scenario.id.clone(),
            });
        }
        scenario
            .structure
            .validate()
            .map_err(|source| ValidationError::Structure {
                id: scenario.id.clone(),
                source,
            })?;
    }

    Ok(())
}
