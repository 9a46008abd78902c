//! Engine feature switches.

use dd_core::DelayRange;

use crate::EngineResult;

/// Feature configuration for one [`AssignmentEngine`][crate::AssignmentEngine].
///
/// The default is the plain greedy solver: no delays, no dynamic agents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Attach a random delay to every assignment.
    pub delays_enabled: bool,

    /// Lower delay bound in seconds.  Only read when `delays_enabled`.
    pub min_delay: f64,

    /// Upper delay bound in seconds.  Only read when `delays_enabled`.
    pub max_delay: f64,

    /// Accept agents registered to join part-way through the run.
    pub dynamic_agents_enabled: bool,

    /// Seed for the default delay RNG.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let range = DelayRange::default();
        Self {
            delays_enabled:         false,
            min_delay:              range.min(),
            max_delay:              range.max(),
            dynamic_agents_enabled: false,
            seed:                   None,
        }
    }
}

impl EngineConfig {
    /// Enable delays drawn uniformly from `[min, max]` seconds.
    pub fn with_delays(mut self, min: f64, max: f64) -> Self {
        self.delays_enabled = true;
        self.min_delay = min;
        self.max_delay = max;
        self
    }

    pub fn with_dynamic_agents(mut self) -> Self {
        self.dynamic_agents_enabled = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The validated delay interval.
    ///
    /// The builder checks this regardless of `delays_enabled`.
    pub fn delay_range(&self) -> EngineResult<DelayRange> {
        Ok(DelayRange::new(self.min_delay, self.max_delay)?)
    }
}
