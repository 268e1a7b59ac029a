//! Rolling density and current statistics.
//!
//! Each step the controller hands the aggregator the lattice occupancy.
//! The aggregator derives the mean-field local current on every bond,
//!
//! ```text
//! J[i] = r·ρ[i]·(1 − ρ[i+1]) − l·ρ[i+1]·(1 − ρ[i])
//! ```
//!
//! and keeps the last `window` samples. A single sample is an
//! instantaneous per-tick estimate; [`density`](StatisticsAggregator::density)
//! and [`current`](StatisticsAggregator::current) average over the window.

use asep_core::{RatesConfig, TickId};

use crate::config::{validate_window, ConfigError};
use crate::ring::SampleRing;
use crate::snapshot::StatisticsView;

/// Default number of samples retained.
pub const DEFAULT_WINDOW: usize = 100;

/// Occupancy and local current recorded at one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsSample {
    /// The tick the sample was taken at.
    pub tick: TickId,
    /// Per-site occupancy, 1.0 for occupied or reserved sites.
    pub density: Vec<f64>,
    /// Mean-field current on each bond `(i, i + 1)`.
    pub current: Vec<f64>,
}

/// Fixed-window history of [`StatisticsSample`]s.
#[derive(Clone, Debug)]
pub struct StatisticsAggregator {
    ring: SampleRing<StatisticsSample>,
}

impl StatisticsAggregator {
    /// An empty aggregator keeping `window` samples. `window` must be >= 2.
    pub fn new(window: usize) -> Result<Self, ConfigError> {
        validate_window(window)?;
        Ok(Self {
            ring: SampleRing::new(window),
        })
    }

    /// Number of samples retained at most.
    pub fn window(&self) -> usize {
        self.ring.capacity()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether no sample has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Record the occupancy observed at `tick`.
    ///
    /// `wraps` adds the bond from the last site back to the first.
    pub fn record(&mut self, tick: TickId, density: Vec<f64>, rates: &RatesConfig, wraps: bool) {
        let current = local_current(&density, rates, wraps);
        self.ring.push(StatisticsSample {
            tick,
            density,
            current,
        });
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&StatisticsSample> {
        self.ring.latest()
    }

    /// Per-site density averaged over the window.
    pub fn density(&self) -> Vec<f64> {
        self.rolling_mean(|s| &s.density)
    }

    /// Per-bond current averaged over the window.
    pub fn current(&self) -> Vec<f64> {
        self.rolling_mean(|s| &s.current)
    }

    /// All retained samples, oldest first.
    pub fn history(&self) -> Vec<StatisticsSample> {
        self.ring.iter().cloned().collect()
    }

    /// Forget every sample.
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    /// Owned view for a snapshot.
    pub fn view(&self) -> StatisticsView {
        StatisticsView {
            density: self.density(),
            current: self.current(),
            history: self.history(),
        }
    }

    fn rolling_mean(&self, field: impl Fn(&StatisticsSample) -> &Vec<f64>) -> Vec<f64> {
        let Some(latest) = self.ring.latest() else {
            return Vec::new();
        };
        let len = field(latest).len();
        let mut sum = vec![0.0; len];
        let mut count = 0usize;
        for sample in self.ring.iter() {
            let values = field(sample);
            if values.len() != len {
                continue;
            }
            sum.iter_mut().zip(values).for_each(|(acc, v)| *acc += v);
            count += 1;
        }
        let n = count.max(1) as f64;
        sum.into_iter().map(|v| v / n).collect()
    }
}

/// Mean-field local current on each bond of `density`.
///
/// Open and closed lattices have `N - 1` bonds; a wrapping lattice has `N`,
/// the last joining site `N - 1` to site 0. Empty input gives no bonds.
pub fn local_current(density: &[f64], rates: &RatesConfig, wraps: bool) -> Vec<f64> {
    let n = density.len();
    if n == 0 {
        return Vec::new();
    }
    let bonds = if wraps { n } else { n - 1 };
    (0..bonds)
        .map(|i| {
            let here = density[i];
            let next = density[(i + 1) % n];
            rates.right_rate * here * (1.0 - next) - rates.left_rate * next * (1.0 - here)
        })
        .collect()
}
