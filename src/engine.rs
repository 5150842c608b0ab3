//! The guessing engine: one owner for config, randomness, session, round
//! and attempt log.
//!
//! Every method runs to completion on the caller's thread. Drivers that
//! delay the next round must call [`Game::next_round`] from that same
//! thread; the engine does no locking of its own.

use crate::attempt_log::{AttemptLog, AttemptLogEntry, RECENT_ENTRIES};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::hints::Hint;
use crate::rng::GameRng;
use crate::round::{GuessOutcome, Round};
use crate::sanitize::{sanitize_guess, sanitize_round_count};
use crate::session::{Session, SessionStats};
use crate::solver::Suggestion;
use crate::{debug_log, info_log};

/// Read-only view of the numbers a status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub round_number: u32,
    pub rounds_total: u32,
    pub attempts_left: u32,
    pub max_attempts: u32,
    pub hints_left: u32,
    pub lower_bound: i32,
    pub upper_bound: i32,
    pub wins: u32,
    pub round_active: bool,
    pub session_complete: bool,
}

/// What follows a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProgress {
    /// Round still in play.
    InRound,
    /// The round ended and round `next` of the session is due.
    NextRoundDue { next: u32 },
    Complete,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    session: Session,
    round: Round,
    attempt_log: AttemptLog,
}

impl Game {
    /// Build a game with an entropy-seeded generator and a one-round session.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Build a game drawing secrets from `rng`. The first round starts immediately.
    pub fn with_rng(config: GameConfig, mut rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        let session = Session::new(1, &config)?;
        let round = Round::start(&config, &mut rng);
        let attempt_log = AttemptLog::new(config.attempt_log_capacity);
        info_log!(
            "Game created: range {}..={}, seed {:?}",
            config.low,
            config.high,
            rng.seed()
        );
        Ok(Self {
            config,
            rng,
            session,
            round,
            attempt_log,
        })
    }

    /// Replace the current round with a fresh one. The session is untouched.
    pub fn start_round(&mut self) -> &Round {
        self.round = Round::start(&self.config, &mut self.rng);
        debug_log!(
            "start_round() - round {} of {}",
            self.session.display_round(),
            self.session.rounds_total()
        );
        &self.round
    }

    /// Restart the round in progress with a new secret.
    pub fn restart_round(&mut self) -> Result<&Round, GameError> {
        if self.session.is_complete() {
            return Err(GameError::SessionComplete);
        }
        info_log!("Restarting round {}", self.session.current_round());
        Ok(self.start_round())
    }

    /// Start the next round of the session once the current one has ended.
    pub fn next_round(&mut self) -> Result<&Round, GameError> {
        if self.round.is_active() {
            return Ok(&self.round);
        }
        if self.session.is_complete() {
            return Err(GameError::SessionComplete);
        }
        Ok(self.start_round())
    }

    /// Validate `raw_rounds` and begin a new session with it.
    ///
    /// On error the current session, round and log are left as they were.
    pub fn start_new_session(&mut self, raw_rounds: &str) -> Result<&Session, GameError> {
        let rounds = sanitize_round_count(raw_rounds, &self.config)?;
        self.start_session(rounds)
    }

    pub fn start_session(&mut self, rounds_total: u32) -> Result<&Session, GameError> {
        let session = Session::new(rounds_total, &self.config)?;
        info_log!("New session with {} rounds", rounds_total);
        self.session = session;
        self.attempt_log.clear();
        self.start_round();
        Ok(&self.session)
    }

    /// Sanitize raw text, log the attempt and apply it to the round.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GameError> {
        if !self.round.is_active() {
            return Err(GameError::RoundInactive);
        }
        match sanitize_guess(raw, &self.config) {
            Ok(value) => self.guess(value),
            Err(err) => {
                debug_log!("submit_guess() - rejected {:?}: {}", raw, err);
                self.attempt_log.log_attempt(raw, false);
                Err(err.into())
            }
        }
    }

    /// Apply an already sanitized integer.
    pub fn guess(&mut self, value: i32) -> Result<GuessOutcome, GameError> {
        let outcome = self.round.process_guess(value)?;
        self.attempt_log.log_attempt(value, outcome.is_valid());

        if outcome.ends_round() {
            self.session.record_round(outcome.is_win());
            info_log!(
                "Round ended ({}): {} wins after {} rounds",
                if outcome.is_win() { "won" } else { "lost" },
                self.session.wins(),
                self.session.rounds_completed()
            );
        }
        Ok(outcome)
    }

    pub fn take_hint(&mut self) -> Result<Hint, GameError> {
        let hint = self.round.take_hint()?;
        debug_log!("take_hint() - level {}, {} left", hint.level, self.round.hints_left());
        Ok(hint)
    }

    pub fn suggestion(&self) -> Result<Suggestion, GameError> {
        if !self.round.is_active() {
            return Err(GameError::RoundInactive);
        }
        Ok(self.round.suggestion())
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        if self.round.is_active() {
            SessionProgress::InRound
        } else if self.session.is_complete() {
            SessionProgress::Complete
        } else {
            SessionProgress::NextRoundDue {
                next: self.session.current_round(),
            }
        }
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        self.session.win_rate()
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.session.stats()
    }

    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            round_number: self.session.display_round(),
            rounds_total: self.session.rounds_total(),
            attempts_left: self.round.attempts_left(),
            max_attempts: self.config.max_attempts,
            hints_left: self.round.hints_left(),
            lower_bound: self.round.lower_bound(),
            upper_bound: self.round.upper_bound(),
            wins: self.session.wins(),
            round_active: self.round.is_active(),
            session_complete: self.session.is_complete(),
        }
    }

    /// Record an attempt that never reached the engine's guess path.
    pub fn log_attempt(&mut self, raw: &str, is_valid: bool) {
        self.attempt_log.log_attempt(raw, is_valid);
    }

    pub fn clear_attempt_log(&mut self) {
        self.attempt_log.clear();
    }

    /// Entries a log viewer should show, oldest first.
    #[must_use]
    pub fn recent_attempts(&self) -> Vec<AttemptLogEntry> {
        self.attempt_log.recent(RECENT_ENTRIES)
    }

    #[must_use]
    pub fn attempt_log(&self) -> &AttemptLog {
        &self.attempt_log
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
