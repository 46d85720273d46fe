//! sf-project: scenario file loading and validation.
//!
//! Scenario files are versioned YAML documents listing the named structure
//! configurations a batch run should evaluate, plus optional simulation
//! option overrides.

pub mod schema;
pub mod validate;

pub use schema::{ScenarioDef, ScenarioFile, SimOptionsDef, load_scenario_file};
pub use validate::{ValidationError, validate_scenario_file};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
