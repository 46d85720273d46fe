//! Caller-owned bounded result cache.
//!
//! Maps a run's input fingerprint (see `hash`) to its `SimulationResult`
//! with least-recently-used eviction. Lives with the caller; the engine
//! stays a pure function with no memory of past calls.

use sf_sim::SimulationResult;
use std::collections::{HashMap, VecDeque};

pub struct ResultCache {
    capacity: usize,
    map: HashMap<String, SimulationResult>,
    // Front = least recently used
    order: VecDeque<String>,
}

impl ResultCache {
    /// `capacity` of zero means the cache never retains anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, run_id: &str) -> bool {
        self.map.contains_key(run_id)
    }

    /// Look up a cached result, marking it most recently used.
    pub fn get(&mut self, run_id: &str) -> Option<&SimulationResult> {
        if self.map.contains_key(run_id) {
            self.touch(run_id);
        }
        self.map.get(run_id)
    }

    /// Insert a result, evicting the least recently used entry when full.
    pub fn insert(&mut self, run_id: String, result: SimulationResult) {
        if self.capacity == 0 {
            return;
        }
        if self.map.insert(run_id.clone(), result).is_some() {
            self.touch(&run_id);
            return;
        }
        self.order.push_back(run_id);
        while self.map.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.map.remove(&evicted);
            }
        }
    }

    fn touch(&mut self, run_id: &str) {
        if let Some(pos) = self.order.iter().position(|id| id == run_id) {
            if let Some(id) = self.order.remove(pos) {
                self.order.push_back(id);
            }
        }
    }
}
