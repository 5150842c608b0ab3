//! Validation of raw text typed by the player.
//!
//! Guesses pass through two gates: this module turns text into an integer
//! within the storage range, and the round later decides whether that
//! integer is inside the play range.

use crate::config::GameConfig;
use crate::error::{InputError, RoundCountError};

/// Characters that are never accepted in a guess.
pub const UNSAFE_CHARS: [char; 11] = ['<', '>', '&', '"', '\'', '\\', '/', ';', '|', '`', '$'];

/// Turn raw guess text into an integer.
///
/// Everything except ASCII digits and `-` is stripped before parsing, so
/// `"12.5"` becomes `125` and `"4 2"` becomes `42`.
pub fn sanitize_guess(raw: &str, config: &GameConfig) -> Result<i32, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyInput);
    }

    if trimmed.chars().any(|c| UNSAFE_CHARS.contains(&c)) {
        log::warn!("Rejected guess containing unsafe characters");
        return Err(InputError::UnsafeCharacters);
    }

    if trimmed.chars().count() > config.max_guess_len {
        return Err(InputError::TooLong {
            max: config.max_guess_len,
        });
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return Err(InputError::NotANumber);
    }

    // Ten digits overflow i32 but are still a number, just a too-large one.
    let value: i64 = cleaned.parse().map_err(|_| InputError::NotANumber)?;
    if value < config.storage_min || value > config.storage_max {
        return Err(InputError::OutOfStorageRange { value });
    }

    i32::try_from(value).map_err(|_| InputError::OutOfStorageRange { value })
}

/// Validate the number of rounds requested for a new session.
pub fn sanitize_round_count(raw: &str, config: &GameConfig) -> Result<u32, RoundCountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RoundCountError::Empty);
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(RoundCountError::NotDigits);
    }

    if trimmed.len() > config.max_round_digits {
        return Err(RoundCountError::TooManyDigits {
            max: config.max_rounds,
        });
    }

    let rounds: u32 = trimmed.parse().map_err(|_| RoundCountError::NotDigits)?;
    if rounds < 1 {
        Err(RoundCountError::BelowMinimum)
    } else if rounds > config.max_rounds {
        Err(RoundCountError::AboveMaximum {
            max: config.max_rounds,
        })
    } else {
        Ok(rounds)
    }
}
