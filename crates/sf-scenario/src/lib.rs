//! sf-scenario: batch execution of simulations across scenarios and storms.
//!
//! Thin orchestration over `sf_sim::run_simulation`: iterate the
//! (scenario, storm) cross product, run each combination independently, and
//! collect comparable results. Runs share no state, so they execute in
//! parallel; a defect in one configuration never aborts its siblings.

pub mod runner;

pub use runner::{
    BatchEntry, NamedStorm, engine_version, run_batch, run_batch_cached, run_one,
};
