//! Tunable constants for a game session.

use crate::error::ConfigError;

pub const DEFAULT_LOW: i32 = 0;
pub const DEFAULT_HIGH: i32 = 100;
pub const DEFAULT_ATTEMPTS: u32 = 7;
pub const DEFAULT_HINTS: u32 = 3;
pub const DEFAULT_MAX_GUESS_LEN: usize = 10;
pub const DEFAULT_STORAGE_MIN: i64 = -999;
pub const DEFAULT_STORAGE_MAX: i64 = 999;
pub const DEFAULT_MAX_ROUND_DIGITS: usize = 3;
pub const DEFAULT_MAX_ROUNDS: u32 = 999;
pub const DEFAULT_ATTEMPT_LOG_CAPACITY: usize = 100;
/// Upper limit for `max_attempts` and `max_hints`.
pub const MAX_PER_ROUND: u32 = 1000;

/// Everything a round or session needs to know about the rules.
///
/// All values are fixed once a [`crate::Game`] is built; a new config
/// means a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Lowest value the secret can take (inclusive).
    pub low: i32,
    /// Highest value the secret can take (inclusive).
    pub high: i32,
    pub max_attempts: u32,
    pub max_hints: u32,
    /// Longest trimmed guess text accepted before parsing.
    pub max_guess_len: usize,
    /// Parsed guesses outside `storage_min..=storage_max` are rejected
    /// before the play range is even considered.
    pub storage_min: i64,
    pub storage_max: i64,
    pub max_round_digits: usize,
    pub max_rounds: u32,
    pub attempt_log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
            max_attempts: DEFAULT_ATTEMPTS,
            max_hints: DEFAULT_HINTS,
            max_guess_len: DEFAULT_MAX_GUESS_LEN,
            storage_min: DEFAULT_STORAGE_MIN,
            storage_max: DEFAULT_STORAGE_MAX,
            max_round_digits: DEFAULT_MAX_ROUND_DIGITS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            attempt_log_capacity: DEFAULT_ATTEMPT_LOG_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Check that the rules are self-consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::EmptyRange {
                low: self.low,
                high: self.high,
            });
        }
        if i64::from(self.low) < self.storage_min || i64::from(self.high) > self.storage_max {
            return Err(ConfigError::RangeExceedsStorage {
                low: self.low,
                high: self.high,
                min: self.storage_min,
                max: self.storage_max,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.max_attempts > MAX_PER_ROUND {
            return Err(ConfigError::TooManyAttempts { max: MAX_PER_ROUND });
        }
        if self.max_hints > MAX_PER_ROUND {
            return Err(ConfigError::TooManyHints { max: MAX_PER_ROUND });
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.attempt_log_capacity == 0 {
            return Err(ConfigError::NoLogCapacity);
        }
        Ok(())
    }

    /// Number of integers in the play range.
    #[must_use]
    pub fn range_size(&self) -> i64 {
        i64::from(self.high) - i64::from(self.low) + 1
    }

    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.low, 0);
        assert_eq!(config.high, 100);
        assert_eq!(config.max_attempts, 7);
        assert_eq!(config.max_hints, 3);
        assert_eq!(config.range_size(), 101);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = GameConfig {
            low: 50,
            high: 10,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyRange { low: 50, high: 10 })
        );
    }

    #[test]
    fn test_range_outside_storage_rejected() {
        let config = GameConfig {
            high: 5000,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeExceedsStorage { .. })
        ));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = GameConfig {
            max_attempts: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoAttempts));
    }

    #[test]
    fn test_huge_attempt_and_hint_counts_rejected() {
        let config = GameConfig {
            max_attempts: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyAttempts { max: MAX_PER_ROUND })
        );

        let config = GameConfig {
            max_hints: MAX_PER_ROUND + 1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyHints { max: MAX_PER_ROUND })
        );

        let config = GameConfig {
            max_attempts: MAX_PER_ROUND,
            max_hints: MAX_PER_ROUND,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_single_value_range_allowed() {
        let config = GameConfig {
            low: 5,
            high: 5,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.contains(5));
        assert!(!config.contains(6));
    }
}
