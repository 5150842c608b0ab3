use clap::Parser;
use crate::attempt_log::AttemptLogEntry;
use crate::config::GameConfig;
use crate::engine::StatusSnapshot;
use crate::error::GameError;
use crate::game_state::{GameInterface, RoundInfo, UserAction};
use crate::hints::Hint;
use crate::round::GuessOutcome;
use crate::session::SessionStats;
use crate::solver::Suggestion;
use std::io::BufRead;
use std::thread;
use std::time::Duration;

/// Number guessing game options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of rounds in the first session (1-999)
    #[arg(short = 'r', long = "rounds")]
    pub rounds: Option<String>,

    /// Seed for the secret number generator, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lowest possible secret
    #[arg(long, default_value_t = crate::config::DEFAULT_LOW, allow_hyphen_values = true)]
    pub low: i32,

    /// Highest possible secret
    #[arg(long, default_value_t = crate::config::DEFAULT_HIGH, allow_hyphen_values = true)]
    pub high: i32,

    /// Guesses allowed per round
    #[arg(short = 'a', long, default_value_t = crate::config::DEFAULT_ATTEMPTS)]
    pub attempts: u32,

    /// Hints allowed per round
    #[arg(long, default_value_t = crate::config::DEFAULT_HINTS)]
    pub hints: u32,

    /// Seconds to wait before the next round starts
    #[arg(long = "round-delay", default_value_t = 3)]
    pub round_delay: u64,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Log debug output (to stderr, or to the log file in TUI mode)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Game rules built from the flags; validated when the game is created.
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            low: self.low,
            high: self.high,
            max_attempts: self.attempts,
            max_hints: self.hints,
            ..GameConfig::default()
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Turn one line of player input into an action.
///
/// Commands are case-insensitive; anything else is treated as a guess.
#[must_use]
pub fn parse_action(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    let lower = trimmed.to_lowercase();
    let (command, argument) = match lower.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest.trim_start())),
        None => (lower.as_str(), None),
    };

    let action = match (command, argument) {
        ("exit" | "quit", None) => UserAction::Exit,
        ("hint", None) => UserAction::Hint,
        ("tip" | "strategy", None) => UserAction::Strategy,
        ("new", None) => return ParsedLine::NeedsRoundCount,
        // Everything after `new` is the count, so "new 5 6" fails validation.
        ("new", Some(rounds)) => UserAction::NewSession(rounds.to_string()),
        ("restart", None) => UserAction::Restart,
        ("stats", None) => UserAction::ShowStats,
        ("log", None) => UserAction::ShowLog,
        ("clear", None) => UserAction::ClearLog,
        ("help", None) => UserAction::Help,
        _ => UserAction::Guess(trimmed.to_string()),
    };
    ParsedLine::Action(action)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParsedLine {
    Action(UserAction),
    /// `new` was typed without a count; ask for one.
    NeedsRoundCount,
}

/// Read one line, or `None` at end of input or on an I/O error.
///
/// Bytes that are not valid UTF-8 are replaced rather than treated as an
/// error, so the engine rejects the line like any other bad input.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => None,
        Ok(_) => Some(String::from_utf8_lossy(&buf).into_owned()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> UserAction {
    println!("\nEnter your guess (or 'hint', 'tip', 'new', 'restart', 'stats', 'log', 'clear', 'help', 'exit'):");
    let Some(line) = read_line(reader) else {
        return UserAction::Exit;
    };

    match parse_action(&line) {
        ParsedLine::Action(action) => action,
        ParsedLine::NeedsRoundCount => {
            println!("How many rounds would you like to play?");
            match read_line(reader) {
                Some(rounds) => UserAction::NewSession(rounds.trim().to_string()),
                None => UserAction::Exit,
            }
        }
    }
}

pub fn display_round_start(info: &RoundInfo) {
    println!("Round {} of {} started!", info.round_number, info.rounds_total);
    println!("I'm thinking of a number between {} and {}...", info.low, info.high);
    println!("You have {} attempts and {} hints.", info.attempts, info.hints);
}

pub fn display_status(status: &StatusSnapshot) {
    if status.round_active {
        println!(
            "[Round {}/{} | Attempts left: {} | Hints left: {} | Wins: {}]",
            status.round_number,
            status.rounds_total,
            status.attempts_left,
            status.hints_left,
            status.wins
        );
    }
}

pub fn display_stats(stats: &SessionStats) {
    println!("{stats}");
}

pub fn display_attempt_log(entries: &[AttemptLogEntry]) {
    if entries.is_empty() {
        println!("No attempts logged yet.");
        return;
    }
    println!("Recent attempts:");
    for entry in entries {
        println!("{entry}");
    }
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self) -> Option<UserAction> {
        Some(read_action(&mut self.reader))
    }

    fn display_round_start(&mut self, info: &RoundInfo) {
        display_round_start(info);
    }

    fn display_status(&mut self, status: &StatusSnapshot) {
        display_status(status);
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome) {
        println!("{outcome}");
    }

    fn display_error(&mut self, error: &GameError) {
        println!("Error: {error}");
    }

    fn display_hint(&mut self, hint: &Hint) {
        println!("Hint: {hint}");
    }

    fn display_suggestion(&mut self, suggestion: &Suggestion) {
        println!("{suggestion}");
    }

    fn display_stats(&mut self, stats: &SessionStats) {
        display_stats(stats);
    }

    fn display_attempt_log(&mut self, entries: &[AttemptLogEntry]) {
        display_attempt_log(entries);
    }

    fn display_message(&mut self, message: &str) {
        println!("{message}");
    }

    fn wait_for_next_round(&mut self, delay: Duration) -> bool {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        true
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
