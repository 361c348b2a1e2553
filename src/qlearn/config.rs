//! Configuration and statistics for a training run.

use serde::{Deserialize, Serialize};

/// Configuration for the self-play trainer.
///
/// The defaults reproduce the canonical setup: learning rate α = 0.5,
/// exploration probability ε = 0.1, starting layout `[1, 3, 5, 7]`.
///
/// # Example
/// ```
/// use nim_selfplay::QConfig;
///
/// let config = QConfig::default().with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QConfig {
    /// Learning rate α for the temporal-difference update, in `(0, 1]`.
    ///
    /// Higher values chase the latest observation harder; 1.0 overwrites
    /// the old estimate outright.
    pub alpha: f64,

    /// Exploration probability ε for epsilon-greedy selection, in `[0, 1]`.
    pub epsilon: f64,

    /// Pile layout every training episode starts from.
    ///
    /// Must contain at least one non-empty pile, otherwise episodes would
    /// begin terminal.
    pub initial_piles: Vec<u32>,

    /// Random seed for reproducibility.
    ///
    /// If set, exploration and tie-breaking are deterministic across runs.
    /// If `None`, the policy seeds itself from entropy.
    pub seed: Option<u64>,
}

impl Default for QConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            epsilon: 0.1,
            initial_piles: vec![1, 3, 5, 7],
            seed: None,
        }
    }
}

impl QConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder method: set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: set the starting pile layout.
    pub fn with_piles(mut self, piles: Vec<u32>) -> Self {
        self.initial_piles = piles;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.initial_piles.iter().all(|&p| p == 0) {
            return Err(ConfigError::EmptyLayout);
        }
        Ok(())
    }
}

/// Errors that can occur when validating a training configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Learning rate is outside `(0, 1]`.
    InvalidAlpha(f64),
    /// Exploration probability is outside `[0, 1]`.
    InvalidEpsilon(f64),
    /// The starting layout has no objects, so episodes would begin terminal.
    EmptyLayout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidAlpha(val) => {
                write!(f, "learning rate {} is out of range (0, 1]", val)
            }
            ConfigError::InvalidEpsilon(val) => {
                write!(f, "exploration probability {} is out of range [0, 1]", val)
            }
            ConfigError::EmptyLayout => {
                write!(f, "starting layout has no objects to remove")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked during self-play training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainStats {
    /// Total number of episodes completed.
    pub episodes: u64,

    /// Number of `(state, move)` pairs written to the table.
    pub entries: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Episodes per second.
    pub episodes_per_second: f64,
}

impl TrainStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update episodes per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.episodes_per_second = self.episodes as f64 / self.elapsed_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = QConfig::default();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.initial_piles, vec![1, 3, 5, 7]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert_eq!(
            QConfig::default().with_alpha(0.0).validate(),
            Err(ConfigError::InvalidAlpha(0.0))
        );
        assert_eq!(
            QConfig::default().with_alpha(1.5).validate(),
            Err(ConfigError::InvalidAlpha(1.5))
        );
        assert_eq!(
            QConfig::default().with_epsilon(-0.1).validate(),
            Err(ConfigError::InvalidEpsilon(-0.1))
        );
        assert_eq!(
            QConfig::default().with_piles(vec![0, 0]).validate(),
            Err(ConfigError::EmptyLayout)
        );
        assert_eq!(
            QConfig::default().with_piles(vec![]).validate(),
            Err(ConfigError::EmptyLayout)
        );
    }
}
