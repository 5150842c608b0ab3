use thiserror::Error;

/// Rejections produced while turning raw guess text into an integer.
///
/// None of these touch round state. The `Display` text is what a player sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Input cannot be empty!")]
    EmptyInput,

    #[error("Invalid characters detected!")]
    UnsafeCharacters,

    #[error("Input too long! Maximum {max} characters.")]
    TooLong { max: usize },

    #[error("Please enter a valid number!")]
    NotANumber,

    #[error("Number out of acceptable range!")]
    OutOfStorageRange { value: i64 },
}

/// Why a requested round count was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundCountError {
    #[error("Please enter number of rounds!")]
    Empty,

    #[error("Please enter only numbers!")]
    NotDigits,

    #[error("Maximum {max} rounds allowed!")]
    TooManyDigits { max: u32 },

    #[error("Must be at least 1 round!")]
    BelowMinimum,

    #[error("Maximum {max} rounds allowed!")]
    AboveMaximum { max: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("play range {low}..={high} is empty")]
    EmptyRange { low: i32, high: i32 },

    #[error("play range {low}..={high} does not fit storage range {min}..={max}")]
    RangeExceedsStorage {
        low: i32,
        high: i32,
        min: i64,
        max: i64,
    },

    #[error("a round needs at least one attempt")]
    NoAttempts,

    #[error("at most {max} attempts per round")]
    TooManyAttempts { max: u32 },

    #[error("at most {max} hints per round")]
    TooManyHints { max: u32 },

    #[error("a session needs at least one round")]
    NoRounds,

    #[error("attempt log capacity must be positive")]
    NoLogCapacity,
}

/// Every recoverable failure the engine reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Invalid round count: {0}")]
    InvalidRoundCount(#[from] RoundCountError),

    #[error("This round is over. Start a new round or session.")]
    RoundInactive,

    #[error("No hints left this round!")]
    NoHintsLeft,

    #[error("Session complete! Start a new session to keep playing.")]
    SessionComplete,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        assert_eq!(InputError::EmptyInput.to_string(), "Input cannot be empty!");
        assert_eq!(
            InputError::TooLong { max: 10 }.to_string(),
            "Input too long! Maximum 10 characters."
        );
    }

    #[test]
    fn test_input_error_converts_transparently() {
        let err: GameError = InputError::NotANumber.into();
        assert_eq!(err, GameError::Input(InputError::NotANumber));
        assert_eq!(err.to_string(), "Please enter a valid number!");
    }

    #[test]
    fn test_round_count_error_is_wrapped() {
        let err: GameError = RoundCountError::BelowMinimum.into();
        assert_eq!(
            err.to_string(),
            "Invalid round count: Must be at least 1 round!"
        );
    }
}
