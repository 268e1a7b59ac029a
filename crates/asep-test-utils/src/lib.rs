//! Test utilities and fixtures for ASEP simulation core development.
//!
//! Provides [`ScriptedSource`], a [`RandomVariateSource`] that replays a
//! fixed list of draws, plus the configuration fixtures and snapshot
//! assertions in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{assert_conserved, assert_exclusion, every_combination, small_config};

use asep_core::RandomVariateSource;

/// Replays a fixed sequence of uniform draws, cycling when exhausted.
///
/// Lets boundary and scheduling tests pin down exactly which side of a
/// probability threshold each draw lands on.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `values` is empty or any value lies outside `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "ScriptedSource needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted draws must lie in [0, 1): {values:?}"
        );
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of uniform draws consumed so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomVariateSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        v
    }
}
