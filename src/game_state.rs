use std::time::Duration;

use crate::attempt_log::AttemptLogEntry;
use crate::engine::{Game, SessionProgress, StatusSnapshot};
use crate::error::GameError;
use crate::hints::Hint;
use crate::round::GuessOutcome;
use crate::session::SessionStats;
use crate::solver::Suggestion;
use crate::{debug_log, info_log};

/// Delay before the next round starts, matching the desktop game.
pub const DEFAULT_ROUND_DELAY: Duration = Duration::from_secs(3);

/// Everything a player can ask the game to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Raw guess text, sanitized by the engine.
    Guess(String),
    Hint,
    Strategy,
    /// Raw round count for a new session.
    NewSession(String),
    Restart,
    ShowStats,
    ShowLog,
    ClearLog,
    Help,
    Exit,
}

/// Information shown when a round begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundInfo {
    pub round_number: u32,
    pub rounds_total: u32,
    pub low: i32,
    pub high: i32,
    pub attempts: u32,
    pub hints: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOptions {
    pub round_delay: Duration,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            round_delay: DEFAULT_ROUND_DELAY,
        }
    }
}

pub const HELP_TEXT: &str = "\
HOW TO PLAY
Guess the secret number in as few attempts as possible.
After each guess you learn whether it was too high or too low,
and the range of numbers that are still possible.

HINTS
Each hint narrows the position of the secret further:
first above/below the middle, then quarters, eighths and sixteenths
of the whole range. Hints never look at your own guesses.

STRATEGY
The strategy tip halves the range you still have left.
Starting in the middle is always a good opening.

SESSIONS
A session is one or more rounds. Statistics track your win rate
across the rounds played so far.";

/// Presentation seam between the engine and a concrete front end.
pub trait GameInterface {
    /// Block until the player does something. `None` means nothing usable
    /// was entered and the driver should ask again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_round_start(&mut self, info: &RoundInfo);
    fn display_status(&mut self, status: &StatusSnapshot);
    fn display_outcome(&mut self, outcome: &GuessOutcome);
    fn display_error(&mut self, error: &GameError);
    fn display_hint(&mut self, hint: &Hint);
    fn display_suggestion(&mut self, suggestion: &Suggestion);
    fn display_stats(&mut self, stats: &SessionStats);
    fn display_attempt_log(&mut self, entries: &[AttemptLogEntry]);
    fn display_message(&mut self, message: &str);
    /// Wait before the next round. Returns `false` if the player quit meanwhile.
    fn wait_for_next_round(&mut self, delay: Duration) -> bool;
    fn display_exit_message(&mut self);
}

fn round_info(game: &Game) -> RoundInfo {
    let config = game.config();
    RoundInfo {
        round_number: game.session().display_round(),
        rounds_total: game.session().rounds_total(),
        low: config.low,
        high: config.high,
        attempts: config.max_attempts,
        hints: config.max_hints,
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Drive `game` with actions from `interface` until the player exits.
pub fn game_loop<I: GameInterface>(game: &mut Game, interface: &mut I, options: &LoopOptions) {
    interface.display_round_start(&round_info(game));
    interface.display_status(&game.status());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        if let Flow::Exit = handle_action(game, interface, action, options) {
            interface.display_exit_message();
            break;
        }
        interface.display_status(&game.status());
    }
}

fn handle_action<I: GameInterface>(
    game: &mut Game,
    interface: &mut I,
    action: UserAction,
    options: &LoopOptions,
) -> Flow {
    match action {
        UserAction::Guess(raw) => match game.submit_guess(&raw) {
            Ok(outcome) => {
                interface.display_outcome(&outcome);
                if outcome.ends_round() {
                    return finish_round(game, interface, options);
                }
            }
            Err(err) => interface.display_error(&err),
        },
        UserAction::Hint => match game.take_hint() {
            Ok(hint) => interface.display_hint(&hint),
            Err(err) => interface.display_error(&err),
        },
        UserAction::Strategy => match game.suggestion() {
            Ok(suggestion) => interface.display_suggestion(&suggestion),
            Err(err) => interface.display_error(&err),
        },
        UserAction::NewSession(raw) => match game.start_new_session(&raw) {
            Ok(session) => {
                let message = format!(
                    "New session started with {} rounds!",
                    session.rounds_total()
                );
                interface.display_message(&message);
                interface.display_round_start(&round_info(game));
            }
            Err(err) => interface.display_error(&err),
        },
        UserAction::Restart => match game.restart_round() {
            Ok(_) => {
                interface.display_message("Round restarted!");
                interface.display_round_start(&round_info(game));
            }
            Err(err) => interface.display_error(&err),
        },
        UserAction::ShowStats => interface.display_stats(&game.stats()),
        UserAction::ShowLog => interface.display_attempt_log(&game.recent_attempts()),
        UserAction::ClearLog => {
            game.clear_attempt_log();
            interface.display_message("Attempt log cleared!");
        }
        UserAction::Help => interface.display_message(HELP_TEXT),
        UserAction::Exit => return Flow::Exit,
    }
    Flow::Continue
}

/// Move the session forward after a round ends.
fn finish_round<I: GameInterface>(game: &mut Game, interface: &mut I, options: &LoopOptions) -> Flow {
    match game.progress() {
        SessionProgress::InRound => Flow::Continue,
        SessionProgress::NextRoundDue { next } => {
            interface.display_status(&game.status());
            interface.display_message(&format!(
                "Starting round {next} in {} seconds...",
                options.round_delay.as_secs()
            ));
            if !interface.wait_for_next_round(options.round_delay) {
                return Flow::Exit;
            }
            match game.next_round() {
                Ok(_) => interface.display_round_start(&round_info(game)),
                Err(err) => interface.display_error(&err),
            }
            Flow::Continue
        }
        SessionProgress::Complete => {
            info_log!("Session complete with {} wins", game.session().wins());
            interface.display_message("Session complete!");
            interface.display_stats(&game.stats());
            Flow::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::rng::GameRng;

    /// Scripted interface that records what the driver showed.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: Vec<UserAction>,
        outcomes: Vec<GuessOutcome>,
        errors: Vec<GameError>,
        hints: Vec<Hint>,
        messages: Vec<String>,
        round_starts: Vec<RoundInfo>,
        stats_shown: usize,
        waits: Vec<Duration>,
        allow_next_round: bool,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(mut actions: Vec<UserAction>) -> Self {
            actions.reverse();
            Self {
                actions,
                allow_next_round: true,
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn read_action(&mut self) -> Option<UserAction> {
            Some(self.actions.pop().unwrap_or(UserAction::Exit))
        }
        fn display_round_start(&mut self, info: &RoundInfo) {
            self.round_starts.push(info.clone());
        }
        fn display_status(&mut self, _status: &StatusSnapshot) {}
        fn display_outcome(&mut self, outcome: &GuessOutcome) {
            self.outcomes.push(*outcome);
        }
        fn display_error(&mut self, error: &GameError) {
            self.errors.push(error.clone());
        }
        fn display_hint(&mut self, hint: &Hint) {
            self.hints.push(hint.clone());
        }
        fn display_suggestion(&mut self, suggestion: &Suggestion) {
            self.messages.push(suggestion.to_string());
        }
        fn display_stats(&mut self, _stats: &SessionStats) {
            self.stats_shown += 1;
        }
        fn display_attempt_log(&mut self, entries: &[AttemptLogEntry]) {
            self.messages.push(format!("log:{}", entries.len()));
        }
        fn display_message(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
        fn wait_for_next_round(&mut self, delay: Duration) -> bool {
            self.waits.push(delay);
            self.allow_next_round
        }
        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn game() -> Game {
        Game::with_rng(GameConfig::default(), GameRng::new(11)).unwrap()
    }

    fn no_delay() -> LoopOptions {
        LoopOptions {
            round_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_immediate_exit() {
        let mut g = game();
        let mut ui = ScriptedInterface::new(vec![UserAction::Exit]);
        game_loop(&mut g, &mut ui, &no_delay());
        assert!(ui.exited);
        assert_eq!(ui.round_starts.len(), 1);
    }

    #[test]
    fn test_errors_are_displayed_not_fatal() {
        let mut g = game();
        let mut ui = ScriptedInterface::new(vec![
            UserAction::Guess(String::new()),
            UserAction::Guess("abc".to_string()),
            UserAction::Guess("1000".to_string()),
            UserAction::NewSession("zero".to_string()),
        ]);
        game_loop(&mut g, &mut ui, &no_delay());
        assert_eq!(ui.errors.len(), 4);
        assert!(ui.exited);
        assert_eq!(g.round().attempts_left(), 7);
    }

    #[test]
    fn test_session_advances_between_rounds() {
        let mut g = game();
        g.start_new_session("2").unwrap();
        let first = g.round().secret().to_string();
        let mut ui = ScriptedInterface::new(vec![UserAction::Guess(first)]);
        game_loop(&mut g, &mut ui, &no_delay());

        assert!(ui.outcomes[0].is_win());
        assert_eq!(ui.waits, vec![Duration::ZERO]);
        assert_eq!(ui.round_starts.len(), 2);
        assert_eq!(ui.round_starts[1].round_number, 2);
        assert!(g.round().is_active());
    }

    #[test]
    fn test_quitting_during_delay_exits() {
        let mut g = game();
        g.start_new_session("2").unwrap();
        let first = g.round().secret().to_string();
        let mut ui = ScriptedInterface::new(vec![
            UserAction::Guess(first),
            UserAction::Hint,
        ]);
        ui.allow_next_round = false;
        game_loop(&mut g, &mut ui, &no_delay());
        assert!(ui.exited);
        assert!(ui.hints.is_empty());
        assert!(!g.round().is_active());
    }

    #[test]
    fn test_session_complete_shows_stats() {
        let mut g = game();
        let secret = g.round().secret().to_string();
        let mut ui = ScriptedInterface::new(vec![
            UserAction::Guess(secret),
            UserAction::Guess("50".to_string()),
        ]);
        game_loop(&mut g, &mut ui, &no_delay());
        assert_eq!(ui.stats_shown, 1);
        assert!(ui.messages.iter().any(|m| m == "Session complete!"));
        assert_eq!(ui.errors, vec![GameError::RoundInactive]);
    }

    #[test]
    fn test_hint_strategy_log_and_help() {
        let mut g = game();
        let mut ui = ScriptedInterface::new(vec![
            UserAction::Hint,
            UserAction::Strategy,
            UserAction::Guess("x".to_string()),
            UserAction::ShowLog,
            UserAction::ClearLog,
            UserAction::ShowLog,
            UserAction::Help,
        ]);
        game_loop(&mut g, &mut ui, &no_delay());
        assert_eq!(ui.hints.len(), 1);
        assert!(ui.messages[0].contains("try 50"));
        assert!(ui.messages.contains(&"log:1".to_string()));
        assert!(ui.messages.contains(&"log:0".to_string()));
        assert!(ui.messages.iter().any(|m| m.starts_with("HOW TO PLAY")));
    }

    #[test]
    fn test_restart_and_new_session_announce_round() {
        let mut g = game();
        let mut ui = ScriptedInterface::new(vec![
            UserAction::Restart,
            UserAction::NewSession("3".to_string()),
        ]);
        game_loop(&mut g, &mut ui, &no_delay());
        assert_eq!(ui.round_starts.len(), 3);
        assert_eq!(ui.round_starts[2].rounds_total, 3);
        assert!(ui.messages.contains(&"Round restarted!".to_string()));
    }
}
