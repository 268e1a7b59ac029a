//! Hop rates and boundary exchange parameters.

use crate::direction::Direction;
use crate::error::RateError;

/// Rates governing hops and boundary exchange.
///
/// Replaced wholesale on update, never mutated field by field inside the
/// engine. Under the Monte Carlo sweep the hop rates double as per-trial
/// acceptance probabilities (see [`sweep_probabilities`](Self::sweep_probabilities)).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatesConfig {
    /// Rate (or probability) of a rightward hop attempt. Default: 1.0.
    pub right_rate: f64,
    /// Rate (or probability) of a leftward hop attempt. Default: 0.0.
    pub left_rate: f64,
    /// Open-reservoir insertion probability at site 0. Default: 0.5.
    pub reservoir_alpha: f64,
    /// Open-reservoir removal probability at site `N - 1`. Default: 0.5.
    pub reservoir_beta: f64,
    /// Rate of the independent portal creation process at each end. Default: 0.5.
    pub portal_creation_rate: f64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            right_rate: 1.0,
            left_rate: 0.0,
            reservoir_alpha: 0.5,
            reservoir_beta: 0.5,
            portal_creation_rate: 0.5,
        }
    }
}

impl RatesConfig {
    /// Totally asymmetric rates: hop right at `right_rate`, never left.
    pub fn totally_asymmetric(right_rate: f64) -> Self {
        Self {
            right_rate,
            left_rate: 0.0,
            ..Self::default()
        }
    }

    /// Replace the reservoir parameters.
    pub fn with_reservoir(mut self, alpha: f64, beta: f64) -> Self {
        self.reservoir_alpha = alpha;
        self.reservoir_beta = beta;
        self
    }

    /// Validate every field.
    ///
    /// Rates must be finite and non-negative; alpha and beta must lie in
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), RateError> {
        let rates = [
            ("right_rate", self.right_rate),
            ("left_rate", self.left_rate),
            ("portal_creation_rate", self.portal_creation_rate),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(RateError::InvalidRate { name, value });
            }
        }
        let probabilities = [
            ("reservoir_alpha", self.reservoir_alpha),
            ("reservoir_beta", self.reservoir_beta),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(RateError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }

    /// Hop rate in the given direction.
    pub fn hop_rate(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Right => self.right_rate,
            Direction::Left => self.left_rate,
        }
    }

    /// Combined hop rate in both directions.
    pub fn total_hop_rate(&self) -> f64 {
        self.right_rate + self.left_rate
    }

    /// Per-trial hop probabilities `(p_right, p_left)` for sweep updates.
    ///
    /// The rates are used directly when they sum to at most 1 and are
    /// scaled down proportionally otherwise, so `p_right + p_left <= 1`.
    pub fn sweep_probabilities(&self) -> (f64, f64) {
        let total = self.total_hop_rate();
        if total > 1.0 {
            (self.right_rate / total, self.left_rate / total)
        } else {
            (self.right_rate, self.left_rate)
        }
    }
}
