//! Delay sampling.
//!
//! # Determinism strategy
//!
//! The engine never calls a global RNG.  Every simulated delay is drawn from
//! a [`DelaySampler`] the caller hands to the engine:
//!
//! - [`DelayRng::new`] seeds a `SmallRng` from a fixed `u64`, so the same seed
//!   always produces the same delay sequence.
//! - [`DelayRng::from_entropy`] is the "real run" default.
//! - Tests implement `DelaySampler` themselves to script exact values.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CoreError, CoreResult};

// ── DelayRange ────────────────────────────────────────────────────────────────

/// A validated closed interval `[min, max]` of delay seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DelayRange {
    min: f64,
    max: f64,
}

impl DelayRange {
    /// Both bounds must be finite and non-negative with `min <= max`.
    pub fn new(min: f64, max: f64) -> CoreResult<Self> {
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && min <= max;
        if !valid {
            return Err(CoreError::InvalidDelayRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(self) -> f64 {
        self.max
    }

    #[inline]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for DelayRange {
    /// 5–30 seconds.
    fn default() -> Self {
        Self { min: 5.0, max: 30.0 }
    }
}

// ── DelaySampler ──────────────────────────────────────────────────────────────

/// Source of simulated delivery delays.
///
/// Implementations must return a value inside `range`.
pub trait DelaySampler {
    fn sample(&mut self, range: DelayRange) -> f64;
}

impl<S: DelaySampler + ?Sized> DelaySampler for &mut S {
    fn sample(&mut self, range: DelayRange) -> f64 {
        (**self).sample(range)
    }
}

impl<S: DelaySampler + ?Sized> DelaySampler for Box<S> {
    fn sample(&mut self, range: DelayRange) -> f64 {
        (**self).sample(range)
    }
}

// ── DelayRng ──────────────────────────────────────────────────────────────────

/// Uniform delay sampler backed by `SmallRng`.
pub struct DelayRng(SmallRng);

impl DelayRng {
    /// Seed deterministically.
    pub fn new(seed: u64) -> Self {
        DelayRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy; delays differ on every run.
    pub fn from_entropy() -> Self {
        DelayRng(SmallRng::from_entropy())
    }

    /// Seeded when `seed` is `Some`, entropy-seeded otherwise.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None    => Self::from_entropy(),
        }
    }
}

impl DelaySampler for DelayRng {
    fn sample(&mut self, range: DelayRange) -> f64 {
        if range.min == range.max {
            return range.min;
        }
        self.0.gen_range(range.min..=range.max)
    }
}
