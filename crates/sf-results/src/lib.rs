//! sf-results: run identity, caching, and timeseries storage.
//!
//! The engine itself is a pure function with no memory of past calls; this
//! crate gives callers the pieces they own instead — a content-based run
//! fingerprint, a bounded LRU cache keyed by it, and a filesystem store for
//! completed runs.

pub mod cache;
pub mod hash;
pub mod store;
pub mod types;

pub use cache::ResultCache;
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
