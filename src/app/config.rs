//! Configuration types for learner creation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Error, Result,
    tictactoe::{Player, SymmetryGroup},
    types::DEFAULT_INITIAL_VALUE,
    value_learning::UpdateRule,
};

/// Default exploration rate
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Configuration for creating a value learner.
///
/// Builder-style API; [`LearnerConfig::validate`] runs when the learner is
/// built.
///
/// # Examples
///
/// ```
/// use tictac::app::LearnerConfig;
/// use tictac::tictactoe::{Player, SymmetryGroup};
/// use tictac::value_learning::UpdateRule;
///
/// let config = LearnerConfig::new()
///     .with_epsilon(0.2)
///     .with_player(Player::O)
///     .with_update_rule(UpdateRule::MonteCarlo)
///     .with_symmetry(SymmetryGroup::Dihedral)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Probability of an exploratory (uniformly random) move
    pub epsilon: f64,
    /// Symbol the learner plays
    pub player: Player,
    /// Starting estimate for unseen non-terminal states
    pub initial_value: f64,
    /// How estimates are updated from experience
    pub update_rule: UpdateRule,
    /// Symmetries merged into one table entry
    pub symmetry: SymmetryGroup,
    /// Random seed for reproducibility. The opponent is reseeded from it too,
    /// see [`LearnerConfig::opponent_seed`].
    pub seed: Option<u64>,
}

impl LearnerConfig {
    /// Create a configuration with default values:
    /// - Epsilon: 0.1
    /// - Player: X
    /// - Initial value: 0.5
    /// - Update rule: temporal difference
    /// - Symmetry: full dihedral group
    /// - Seed: None (non-deterministic)
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            player: Player::X,
            initial_value: DEFAULT_INITIAL_VALUE,
            update_rule: UpdateRule::default(),
            symmetry: SymmetryGroup::default(),
            seed: None,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    pub fn with_initial_value(mut self, initial_value: f64) -> Self {
        self.initial_value = initial_value;
        self
    }

    pub fn with_update_rule(mut self, update_rule: UpdateRule) -> Self {
        self.update_rule = update_rule;
        self
    }

    pub fn with_symmetry(mut self, symmetry: SymmetryGroup) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed handed to the opponent when [`LearnerConfig::seed`] is set, offset
    /// by one so the two random streams differ.
    pub fn opponent_seed(&self) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(1))
    }

    /// Check that epsilon and the initial value are probabilities.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        check_probability("epsilon", self.epsilon)?;
        check_probability("initial value", self.initial_value)?;

        if self.symmetry == SymmetryGroup::Reflections {
            warn!("reflection-only symmetry does not merge every equivalent position");
        }
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("{name} must be within [0, 1], got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LearnerConfig::default();
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.player, Player::X);
        assert_eq!(config.initial_value, 0.5);
        assert_eq!(config.update_rule, UpdateRule::TemporalDifference);
        assert_eq!(config.symmetry, SymmetryGroup::Dihedral);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(LearnerConfig::new().with_epsilon(0.0).validate().is_ok());
        assert!(LearnerConfig::new().with_epsilon(1.0).validate().is_ok());
        assert!(LearnerConfig::new().with_initial_value(1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        for epsilon in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = LearnerConfig::new().with_epsilon(epsilon).validate().unwrap_err();
            assert!(err.to_string().contains("epsilon"));
        }
        let err = LearnerConfig::new()
            .with_initial_value(2.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }
}
