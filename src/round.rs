//! A single play-through against one secret number.

use std::fmt;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::hints::{Hint, generate_hint};
use crate::rng::GameRng;
use crate::solver::{Suggestion, strategic_suggestion};
use crate::debug_log;

/// Direction of a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    TooLow,
    TooHigh,
}

/// What the player still has to work with after a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub attempts_left: u32,
    pub lower_bound: i32,
    pub upper_bound: i32,
}

impl Progress {
    #[must_use]
    pub fn range_width(&self) -> i64 {
        i64::from(self.upper_bound) - i64::from(self.lower_bound) + 1
    }
}

/// Result of feeding one integer to a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Outside the play range. Nothing was consumed.
    OutOfRange { guess: i32, low: i32, high: i32 },
    TooLow { guess: i32, progress: Progress },
    TooHigh { guess: i32, progress: Progress },
    Won { secret: i32, attempts_used: u32 },
    /// The last attempt missed.
    Lost { guess: i32, miss: Miss, secret: i32 },
}

impl GuessOutcome {
    /// True when this outcome finished the round.
    #[must_use]
    pub fn ends_round(&self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost { .. })
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, Self::Won { .. })
    }

    /// Whether the guess counted against the attempt budget.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::OutOfRange { .. })
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { low, high, .. } => {
                write!(f, "Number must be between {low} and {high}!")
            }
            Self::TooLow { guess, progress } | Self::TooHigh { guess, progress } => {
                let direction = if matches!(self, Self::TooLow { .. }) {
                    "low"
                } else {
                    "high"
                };
                writeln!(f, "{guess} is too {direction}!")?;
                writeln!(
                    f,
                    "Try again! {} attempts remaining.",
                    progress.attempts_left
                )?;
                write!(
                    f,
                    "Possible range: {} to {} ({} numbers left)",
                    progress.lower_bound,
                    progress.upper_bound,
                    progress.range_width()
                )
            }
            Self::Won { secret, attempts_used } => write!(
                f,
                "Correct! You won! The number was {secret} (found in {attempts_used} attempts)"
            ),
            Self::Lost { guess, miss, secret } => {
                let direction = match miss {
                    Miss::TooLow => "low",
                    Miss::TooHigh => "high",
                };
                writeln!(f, "{guess} is too {direction}!")?;
                write!(f, "Game Over! The number was {secret}")
            }
        }
    }
}

/// State of the current round.
///
/// The secret always lies in `lower_bound..=upper_bound`, which only ever
/// shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    secret: i32,
    attempts_left: u32,
    hints_left: u32,
    hint_level: u32,
    lower_bound: i32,
    upper_bound: i32,
    guess_history: Vec<i32>,
    active: bool,
    config: GameConfig,
}

impl Round {
    /// Start a round with a secret drawn uniformly from the play range.
    pub fn start(config: &GameConfig, rng: &mut GameRng) -> Self {
        let secret = rng.gen_inclusive(config.low, config.high);
        Self::with_secret(config, secret)
    }

    /// Start a round with a known secret.
    ///
    /// The secret is clamped into the play range.
    #[must_use]
    pub fn with_secret(config: &GameConfig, secret: i32) -> Self {
        debug_log!(
            "Round::with_secret() - range {}..={}, {} attempts, {} hints",
            config.low,
            config.high,
            config.max_attempts,
            config.max_hints
        );
        Self {
            secret: secret.clamp(config.low, config.high),
            attempts_left: config.max_attempts,
            hints_left: config.max_hints,
            hint_level: 0,
            lower_bound: config.low,
            upper_bound: config.high,
            guess_history: Vec::new(),
            active: true,
            config: config.clone(),
        }
    }

    /// Apply a sanitized guess.
    pub fn process_guess(&mut self, guess: i32) -> Result<GuessOutcome, GameError> {
        if !self.active {
            return Err(GameError::RoundInactive);
        }

        if !self.config.contains(guess) {
            return Ok(GuessOutcome::OutOfRange {
                guess,
                low: self.config.low,
                high: self.config.high,
            });
        }

        self.guess_history.push(guess);
        self.attempts_left = self.attempts_left.saturating_sub(1);

        if guess == self.secret {
            self.active = false;
            return Ok(GuessOutcome::Won {
                secret: self.secret,
                attempts_used: self.attempts_used(),
            });
        }

        let miss = if guess < self.secret {
            // guess < secret <= upper_bound, so guess + 1 cannot overflow.
            self.lower_bound = self.lower_bound.max(guess + 1);
            Miss::TooLow
        } else {
            self.upper_bound = self.upper_bound.min(guess - 1);
            Miss::TooHigh
        };

        if self.attempts_left == 0 {
            self.active = false;
            return Ok(GuessOutcome::Lost {
                guess,
                miss,
                secret: self.secret,
            });
        }

        let progress = self.progress();
        Ok(match miss {
            Miss::TooLow => GuessOutcome::TooLow { guess, progress },
            Miss::TooHigh => GuessOutcome::TooHigh { guess, progress },
        })
    }

    /// Spend a hint and reveal the secret's segment at the current level.
    pub fn take_hint(&mut self) -> Result<Hint, GameError> {
        if !self.active {
            return Err(GameError::RoundInactive);
        }
        if self.hints_left == 0 {
            return Err(GameError::NoHintsLeft);
        }

        self.hints_left -= 1;
        let hint = generate_hint(self.secret, self.hint_level, &self.config);
        self.hint_level += 1;
        Ok(hint)
    }

    /// Advisory next guess. Does not change the round.
    #[must_use]
    pub fn suggestion(&self) -> Suggestion {
        strategic_suggestion(self.lower_bound, self.upper_bound, &self.guess_history)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            attempts_left: self.attempts_left,
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
        }
    }

    #[must_use]
    pub fn attempts_used(&self) -> u32 {
        self.config.max_attempts - self.attempts_left
    }

    /// The secret. Drivers should only show it once the round is over.
    #[must_use]
    pub fn secret(&self) -> i32 {
        self.secret
    }

    #[must_use]
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    #[must_use]
    pub fn hints_left(&self) -> u32 {
        self.hints_left
    }

    #[must_use]
    pub fn hint_level(&self) -> u32 {
        self.hint_level
    }

    #[must_use]
    pub fn lower_bound(&self) -> i32 {
        self.lower_bound
    }

    #[must_use]
    pub fn upper_bound(&self) -> i32 {
        self.upper_bound
    }

    #[must_use]
    pub fn guess_history(&self) -> &[i32] {
        &self.guess_history
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}
