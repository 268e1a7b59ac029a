//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the input to
//! [`SimulationController::initialize`](crate::SimulationController::initialize).
//! [`validate()`](SimConfig::validate) checks every field before the
//! controller touches its current state, so a rejected config never leaves
//! a half-built simulation behind.

use std::error::Error;
use std::fmt;

use asep_core::{RateError, RatesConfig};
use asep_space::{BoundaryPolicy, Line, SpaceError};

use crate::scheme::UpdateScheme;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Lattice geometry is invalid.
    Space(SpaceError),
    /// A rate or reservoir probability is invalid.
    Rates(RateError),
    /// More particles than sites.
    TooManyParticles {
        /// Requested particle count.
        particles: usize,
        /// Available sites.
        sites: usize,
    },
    /// time_scale is NaN, infinite, zero, or negative.
    InvalidTimeScale {
        /// The invalid value.
        value: f64,
    },
    /// transit_speed is NaN, infinite, zero, or negative.
    InvalidTransitSpeed {
        /// The invalid value.
        value: f64,
    },
    /// Statistics window is below the minimum of 2.
    StatisticsWindowTooSmall {
        /// The configured window that was too small.
        configured: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "lattice: {e}"),
            Self::Rates(e) => write!(f, "rates: {e}"),
            Self::TooManyParticles { particles, sites } => {
                write!(f, "{particles} particles do not fit on {sites} sites")
            }
            Self::InvalidTimeScale { value } => {
                write!(f, "time_scale must be finite and positive, got {value}")
            }
            Self::InvalidTransitSpeed { value } => {
                write!(f, "transit_speed must be finite and positive, got {value}")
            }
            Self::StatisticsWindowTooSmall { configured } => {
                write!(f, "statistics window {configured} is below minimum of 2")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Rates(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<RateError> for ConfigError {
    fn from(e: RateError) -> Self {
        Self::Rates(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of lattice sites. Default: 20.
    pub site_count: usize,
    /// Particles placed at initialization. Default: 8.
    pub particle_count: usize,
    /// What happens at the lattice ends. Default: Closed.
    pub boundary: BoundaryPolicy,
    /// How hop attempts are scheduled. Default: ContinuousMarkovChain.
    pub scheme: UpdateScheme,
    /// Hop rates and boundary exchange parameters.
    pub rates: RatesConfig,
    /// Virtual seconds per elapsed second. Default: 1.0.
    pub time_scale: f64,
    /// Transit progress per elapsed second. Default: 5.0.
    pub transit_speed: f64,
    /// Seed for the variate source.
    pub seed: u64,
    /// Attach a statistics aggregator with this window. Default: none.
    pub statistics_window: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            site_count: 20,
            particle_count: 8,
            boundary: BoundaryPolicy::Closed,
            scheme: UpdateScheme::ContinuousMarkovChain,
            rates: RatesConfig::default(),
            time_scale: 1.0,
            transit_speed: 5.0,
            seed: 0,
            statistics_window: None,
        }
    }
}

impl SimConfig {
    /// Default configuration with the given lattice size and particle count.
    pub fn new(site_count: usize, particle_count: usize) -> Self {
        Self {
            site_count,
            particle_count,
            ..Self::default()
        }
    }

    /// Set the boundary policy.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the update scheme.
    pub fn with_scheme(mut self, scheme: UpdateScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Replace the rates.
    pub fn with_rates(mut self, rates: RatesConfig) -> Self {
        self.rates = rates;
        self
    }

    /// Set the time scale.
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Set the transit speed.
    pub fn with_transit_speed(mut self, transit_speed: f64) -> Self {
        self.transit_speed = transit_speed;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Attach statistics with the given window.
    pub fn with_statistics(mut self, window: usize) -> Self {
        self.statistics_window = Some(window);
        self
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.line().map(|_| ())
    }

    /// Validate and return the lattice geometry.
    pub(crate) fn line(&self) -> Result<Line, ConfigError> {
        // 1. Lattice must be non-empty and addressable.
        let line = Line::new(self.site_count)?;
        // 2. Every particle needs its own site.
        if self.particle_count > self.site_count {
            return Err(ConfigError::TooManyParticles {
                particles: self.particle_count,
                sites: self.site_count,
            });
        }
        // 3. Rates finite and non-negative, alpha/beta in [0, 1].
        self.rates.validate()?;
        // 4. time_scale finite and positive.
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::InvalidTimeScale {
                value: self.time_scale,
            });
        }
        // 5. transit_speed finite and positive.
        if !self.transit_speed.is_finite() || self.transit_speed <= 0.0 {
            return Err(ConfigError::InvalidTransitSpeed {
                value: self.transit_speed,
            });
        }
        // 6. Statistics window, if present, >= 2.
        if let Some(window) = self.statistics_window {
            validate_window(window)?;
        }
        Ok(line)
    }
}

pub(crate) fn validate_window(window: usize) -> Result<(), ConfigError> {
    if window < 2 {
        return Err(ConfigError::StatisticsWindowTooSmall { configured: window });
    }
    Ok(())
}

// ── ParameterUpdate ────────────────────────────────────────────────

/// A partial configuration change. `None` fields keep their current value.
///
/// Rates, time scale and transit speed are hot-swapped in place. Any other
/// field that actually changes forces a reset with the merged config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterUpdate {
    /// New rates, replacing the current ones wholesale.
    pub rates: Option<RatesConfig>,
    /// New time scale.
    pub time_scale: Option<f64>,
    /// New transit speed.
    pub transit_speed: Option<f64>,
    /// New lattice size (structural).
    pub site_count: Option<usize>,
    /// New initial particle count (structural).
    pub particle_count: Option<usize>,
    /// New boundary policy (structural).
    pub boundary: Option<BoundaryPolicy>,
    /// New update scheme (structural).
    pub scheme: Option<UpdateScheme>,
    /// New seed (structural).
    pub seed: Option<u64>,
}

impl ParameterUpdate {
    /// An update that only replaces the rates.
    pub fn rates(rates: RatesConfig) -> Self {
        Self {
            rates: Some(rates),
            ..Self::default()
        }
    }

    /// `base` with this update applied.
    pub fn merge(&self, base: &SimConfig) -> SimConfig {
        SimConfig {
            site_count: self.site_count.unwrap_or(base.site_count),
            particle_count: self.particle_count.unwrap_or(base.particle_count),
            boundary: self.boundary.unwrap_or(base.boundary),
            scheme: self.scheme.unwrap_or(base.scheme),
            rates: self.rates.unwrap_or(base.rates),
            time_scale: self.time_scale.unwrap_or(base.time_scale),
            transit_speed: self.transit_speed.unwrap_or(base.transit_speed),
            seed: self.seed.unwrap_or(base.seed),
            statistics_window: base.statistics_window,
        }
    }

    /// Whether applying this update to `base` requires a reset.
    pub fn is_structural(&self, base: &SimConfig) -> bool {
        let merged = self.merge(base);
        merged.site_count != base.site_count
            || merged.particle_count != base.particle_count
            || merged.boundary != base.boundary
            || merged.scheme != base.scheme
            || merged.seed != base.seed
    }
}

/// How [`update_parameters`](crate::SimulationController::update_parameters)
/// applied a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateEffect {
    /// Applied in place; particles and in-flight jumps were kept.
    HotSwapped,
    /// The simulation was rebuilt from the merged config.
    Reset,
}
