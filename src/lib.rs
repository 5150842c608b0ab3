// Library interface for number-guess
// This allows integration tests to access internal modules

pub mod attempt_log;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod hints;
pub mod logging;
pub mod rng;
pub mod round;
pub mod sanitize;
pub mod session;
pub mod solver;
pub mod tui;

// Re-export commonly used items for easier testing
pub use attempt_log::{AttemptLog, AttemptLogEntry, AttemptValue};
pub use config::GameConfig;
pub use engine::{Game, SessionProgress, StatusSnapshot};
pub use error::{ConfigError, GameError, InputError, RoundCountError};
pub use game_state::{GameInterface, LoopOptions, UserAction, game_loop};
pub use hints::{Hint, generate_hint};
pub use rng::GameRng;
pub use round::{GuessOutcome, Round};
pub use sanitize::{sanitize_guess, sanitize_round_count};
pub use session::{PerformanceRating, Session, SessionStats};
pub use solver::{Suggestion, recommend_guess, strategic_suggestion};
