//! TUI (Terminal User Interface) module for the number guessing game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! Title, status bar, then three panels side by side (guesses this round,
//! message history, details such as stats or the attempt log), the input
//! line and a key reference.
//!
//! # State Machine
//! - `EnteringGuess` → `EnteringRounds` (after `n`) → back to `EnteringGuess`
//! - `EnteringGuess` → `WaitingForNextRound` (between rounds) → `EnteringGuess`

use crate::attempt_log::AttemptLogEntry;
use crate::engine::StatusSnapshot;
use crate::error::GameError;
use crate::game_state::{GameInterface, RoundInfo, UserAction};
use crate::hints::Hint;
use crate::round::GuessOutcome;
use crate::session::{PerformanceRating, SessionStats};
use crate::solver::Suggestion;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

const MAX_MESSAGES: usize = 200;
const MAX_INPUT_CHARS: usize = 16;
const MAX_ROUNDS_INPUT_CHARS: usize = 6;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::White);
const HINT_STYLE: Style = Style::new().fg(Color::Rgb(255, 152, 0));

#[derive(Clone, Copy, PartialEq, Debug)]
enum Verdict {
    TooLow,
    TooHigh,
    Correct,
}

impl Verdict {
    fn label(self) -> (&'static str, Color) {
        match self {
            Self::TooLow => ("too low  ^", Color::Blue),
            Self::TooHigh => ("too high v", Color::Magenta),
            Self::Correct => ("correct!", Color::Green),
        }
    }
}

#[derive(Debug)]
struct GuessRow {
    value: i32,
    verdict: Verdict,
}

impl GuessRow {
    fn from_outcome(outcome: &GuessOutcome) -> Option<Self> {
        use crate::round::Miss;
        let (value, verdict) = match *outcome {
            GuessOutcome::OutOfRange { .. } => return None,
            GuessOutcome::TooLow { guess, .. } => (guess, Verdict::TooLow),
            GuessOutcome::TooHigh { guess, .. } => (guess, Verdict::TooHigh),
            GuessOutcome::Won { secret, .. } => (secret, Verdict::Correct),
            GuessOutcome::Lost { guess, miss, .. } => match miss {
                Miss::TooLow => (guess, Verdict::TooLow),
                Miss::TooHigh => (guess, Verdict::TooHigh),
            },
        };
        Some(Self { value, verdict })
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum MessageKind {
    Info,
    Success,
    Error,
    Hint,
}

impl MessageKind {
    fn style(self) -> Style {
        match self {
            Self::Info => MESSAGE_STYLE,
            Self::Success => SUCCESS_STYLE,
            Self::Error => ERROR_STYLE,
            Self::Hint => HINT_STYLE,
        }
    }
}

#[derive(Debug)]
enum TuiState {
    EnteringGuess,
    EnteringRounds,
    WaitingForNextRound { seconds_left: u64 },
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    messages: &'a VecDeque<(String, MessageKind)>,
    details_title: &'a str,
    details: &'a [String],
    status: Option<&'a StatusSnapshot>,
    input: &'a str,
    rounds_input: &'a str,
    state: &'a TuiState,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    guesses: Vec<GuessRow>,
    messages: VecDeque<(String, MessageKind)>,
    details_title: String,
    details: Vec<String>,
    status: Option<StatusSnapshot>,
    input: String,
    rounds_input: String,
    state: TuiState,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            guesses: Vec::new(),
            messages: VecDeque::with_capacity(MAX_MESSAGES),
            details_title: "Details".to_string(),
            details: Vec::new(),
            status: None,
            input: String::new(),
            rounds_input: String::new(),
            state: TuiState::EnteringGuess,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            guesses: &self.guesses,
            messages: &self.messages,
            details_title: &self.details_title,
            details: &self.details,
            status: self.status.as_ref(),
            input: &self.input,
            rounds_input: &self.rounds_input,
            state: &self.state,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Append a timestamped line to the message history, one entry per line.
    fn push_message(&mut self, text: &str, kind: MessageKind) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        for line in text.lines() {
            self.messages.push_back((format!("[{stamp}] {line}"), kind));
        }
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    fn set_details(&mut self, title: &str, lines: Vec<String>) {
        self.details_title = title.to_string();
        self.details = lines;
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Panels
                Constraint::Length(3), // Input
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(22),
                Constraint::Percentage(45),
                Constraint::Percentage(33),
            ])
            .split(chunks[2]);

        Self::render_title(f, chunks[0]);
        Self::render_status(f, chunks[1], ctx.status);
        Self::render_guesses(f, panels[0], ctx.guesses);
        Self::render_messages(f, panels[1], ctx.messages);
        Self::render_details(f, panels[2], ctx.details_title, ctx.details);
        Self::render_input(f, chunks[3], ctx.state, ctx.input, ctx.rounds_input);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("NUMBER GUESSING GAME")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn attempts_color(attempts_left: u32, max_attempts: u32) -> Color {
        // Green above the upper half, orange in the middle, red near the end.
        let (left, max) = (u64::from(attempts_left), u64::from(max_attempts));
        if left * 7 > max * 4 {
            Color::Green
        } else if left * 7 > max * 2 {
            Color::Rgb(255, 152, 0)
        } else {
            Color::Red
        }
    }

    fn render_status(f: &mut Frame, area: Rect, status: Option<&StatusSnapshot>) {
        let line = match status {
            None => Line::from("Ready"),
            Some(s) => {
                let mut spans = vec![
                    Span::styled(
                        format!("Round {} of {}", s.round_number, s.rounds_total),
                        HEADER_STYLE,
                    ),
                    Span::raw("  |  "),
                    Span::styled(
                        format!("Attempts left: {}", s.attempts_left),
                        Style::default()
                            .fg(Self::attempts_color(s.attempts_left, s.max_attempts))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  |  "),
                    Span::styled(
                        format!("Hints left: {}", s.hints_left),
                        if s.hints_left > 0 {
                            INFO_STYLE
                        } else {
                            Style::default().fg(Color::DarkGray)
                        },
                    ),
                    Span::raw("  |  "),
                    Span::raw(format!("Range: {} to {}", s.lower_bound, s.upper_bound)),
                    Span::raw("  |  "),
                    Span::raw(format!("Wins: {}", s.wins)),
                ];
                if s.session_complete {
                    spans.push(Span::raw("  |  "));
                    spans.push(Span::styled("Session complete", SUCCESS_STYLE));
                } else if !s.round_active {
                    spans.push(Span::raw("  |  "));
                    spans.push(Span::styled("Round over", INFO_STYLE));
                }
                Line::from(spans)
            }
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_guesses(f: &mut Frame, area: Rect, guesses: &[GuessRow]) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let visible = block.inner(area).height as usize;
        let skip = guesses.len().saturating_sub(visible);
        let lines: Vec<Line> = guesses
            .iter()
            .skip(skip)
            .enumerate()
            .map(|(i, row)| {
                let (label, color) = row.verdict.label();
                Line::from(vec![
                    Span::raw(format!("{:>2}. ", skip + i + 1)),
                    Span::styled(
                        format!("{:>4} ", row.value),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(label, Style::default().fg(color)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_messages(f: &mut Frame, area: Rect, messages: &VecDeque<(String, MessageKind)>) {
        let block = Block::default().title("Game Messages").borders(Borders::ALL);
        let visible = block.inner(area).height as usize;
        let skip = messages.len().saturating_sub(visible);
        let lines: Vec<Line> = messages
            .iter()
            .skip(skip)
            .map(|(text, kind)| Line::from(Span::styled(text.as_str(), kind.style())))
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_details(f: &mut Frame, area: Rect, title: &str, details: &[String]) {
        let lines: Vec<Line> = details.iter().map(|l| Line::from(l.as_str())).collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, state: &TuiState, input: &str, rounds_input: &str) {
        let (title, text) = match state {
            TuiState::EnteringGuess => ("Your guess", format!("> {input}_")),
            TuiState::EnteringRounds => ("How many rounds?", format!("> {rounds_input}_")),
            TuiState::WaitingForNextRound { seconds_left } => (
                "Next round",
                format!("Starting in {seconds_left} seconds..."),
            ),
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "0-9: Type guess | ENTER: Guess | h: Hint | s: Strategy | n: New session | r: Restart | t: Stats | l: Log | c: Clear log | ?: Help | ESC: Quit"
            }
            TuiState::EnteringRounds => "Type the number of rounds | ENTER: Start | ESC: Cancel",
            TuiState::WaitingForNextRound { .. } => "ENTER: Start now | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Wait up to `timeout` for a key press, dropping everything else.
    fn next_key(timeout: Duration) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {
                debug_log!("next_key() - Ignoring non-key event");
                Ok(None)
            }
            Event::Resize(_, _) => Ok(None),
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                // Alt-tab can inject replacement or control characters.
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        let Some(key) = Self::next_key(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? else {
            return Ok(None);
        };
        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        if Self::has_modifier_keys(&key) {
            return Ok(None);
        }

        match self.state {
            TuiState::EnteringGuess => Ok(self.handle_guess_input(key)),
            TuiState::EnteringRounds => Ok(self.handle_rounds_input(key)),
            TuiState::WaitingForNextRound { .. } => Ok(None),
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() || c == '?' => {
                Self::command_for(c).or_else(|| {
                    if c.eq_ignore_ascii_case(&'n') {
                        self.rounds_input.clear();
                        self.state = TuiState::EnteringRounds;
                    } else {
                        self.push_message(
                            &format!("Unknown command key '{c}'. Press ? for help."),
                            MessageKind::Error,
                        );
                    }
                    None
                })
            }
            KeyCode::Char(c) if self.input.chars().count() < MAX_INPUT_CHARS => {
                // Anything else goes to the engine, which decides what is acceptable.
                self.input.push(c);
                None
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn command_for(c: char) -> Option<UserAction> {
        match c.to_ascii_lowercase() {
            'h' => Some(UserAction::Hint),
            's' => Some(UserAction::Strategy),
            'r' => Some(UserAction::Restart),
            't' => Some(UserAction::ShowStats),
            'l' => Some(UserAction::ShowLog),
            'c' => Some(UserAction::ClearLog),
            '?' => Some(UserAction::Help),
            _ => None,
        }
    }

    fn handle_rounds_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => {
                self.rounds_input.clear();
                self.state = TuiState::EnteringGuess;
                None
            }
            KeyCode::Enter => {
                self.state = TuiState::EnteringGuess;
                Some(UserAction::NewSession(std::mem::take(&mut self.rounds_input)))
            }
            KeyCode::Backspace => {
                self.rounds_input.pop();
                None
            }
            KeyCode::Char(c) if self.rounds_input.chars().count() < MAX_ROUNDS_INPUT_CHARS => {
                self.rounds_input.push(c);
                None
            }
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_round_start(&mut self, info: &RoundInfo) {
        self.guesses.clear();
        self.input.clear();
        self.push_message(
            &format!(
                "Round {} of {} started! I'm thinking of a number between {} and {}...",
                info.round_number, info.rounds_total, info.low, info.high
            ),
            MessageKind::Info,
        );
        self.set_details(
            "Round",
            vec![
                format!("Range: {} to {}", info.low, info.high),
                format!("Attempts: {}", info.attempts),
                format!("Hints: {}", info.hints),
                String::new(),
                "Tip: start in the middle to use".to_string(),
                "binary search.".to_string(),
            ],
        );
        self.draw_or_log();
    }

    fn display_status(&mut self, status: &StatusSnapshot) {
        self.status = Some(*status);
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome) {
        if let Some(row) = GuessRow::from_outcome(outcome) {
            self.guesses.push(row);
        }
        let kind = match outcome {
            GuessOutcome::Won { .. } => MessageKind::Success,
            GuessOutcome::OutOfRange { .. } | GuessOutcome::Lost { .. } => MessageKind::Error,
            GuessOutcome::TooLow { .. } | GuessOutcome::TooHigh { .. } => MessageKind::Info,
        };
        self.push_message(&outcome.to_string(), kind);
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &GameError) {
        self.push_message(&error.to_string(), MessageKind::Error);
        self.draw_or_log();
    }

    fn display_hint(&mut self, hint: &Hint) {
        self.push_message(&format!("Hint: {hint}"), MessageKind::Hint);
        self.draw_or_log();
    }

    fn display_suggestion(&mut self, suggestion: &Suggestion) {
        self.push_message(&suggestion.to_string(), MessageKind::Hint);
        self.draw_or_log();
    }

    fn display_stats(&mut self, stats: &SessionStats) {
        let mut lines: Vec<String> = stats.to_string().lines().map(str::to_string).collect();
        if stats.rating == PerformanceRating::Excellent {
            lines.push(String::new());
            lines.push("*** Outstanding session ***".to_string());
        }
        self.set_details("Statistics", lines);
        self.draw_or_log();
    }

    fn display_attempt_log(&mut self, entries: &[AttemptLogEntry]) {
        let lines = if entries.is_empty() {
            vec!["No attempts logged yet.".to_string()]
        } else {
            entries.iter().map(ToString::to_string).collect()
        };
        self.set_details("Recent Attempts", lines);
        self.draw_or_log();
    }

    fn display_message(&mut self, message: &str) {
        if message.lines().count() > 3 {
            // Long texts such as help belong in the details panel.
            self.set_details("Help", message.lines().map(str::to_string).collect());
        } else {
            self.push_message(message, MessageKind::Info);
        }
        self.draw_or_log();
    }

    fn wait_for_next_round(&mut self, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            self.state = TuiState::WaitingForNextRound {
                seconds_left: remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0),
            };
            self.draw_or_log();

            let timeout = remaining.min(Duration::from_millis(EVENT_POLL_TIMEOUT_MS));
            match Self::next_key(timeout) {
                Ok(Some(key)) if key.code == KeyCode::Esc => {
                    self.state = TuiState::EnteringGuess;
                    return false;
                }
                Ok(Some(key)) if key.code == KeyCode::Enter => break,
                Ok(_) => {}
                Err(e) => {
                    debug_log!("wait_for_next_round() - Input error: {}", e);
                    break;
                }
            }
        }
        self.state = TuiState::EnteringGuess;
        true
    }

    fn display_exit_message(&mut self) {
        self.push_message("Exiting...", MessageKind::Info);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{Miss, Progress};

    fn progress() -> Progress {
        Progress {
            attempts_left: 5,
            lower_bound: 0,
            upper_bound: 100,
        }
    }

    #[test]
    fn test_guess_rows_from_outcomes() {
        let low = GuessRow::from_outcome(&GuessOutcome::TooLow {
            guess: 10,
            progress: progress(),
        })
        .unwrap();
        assert_eq!((low.value, low.verdict), (10, Verdict::TooLow));

        let lost = GuessRow::from_outcome(&GuessOutcome::Lost {
            guess: 90,
            miss: Miss::TooHigh,
            secret: 3,
        })
        .unwrap();
        assert_eq!((lost.value, lost.verdict), (90, Verdict::TooHigh));

        let won = GuessRow::from_outcome(&GuessOutcome::Won {
            secret: 42,
            attempts_used: 2,
        })
        .unwrap();
        assert_eq!((won.value, won.verdict), (42, Verdict::Correct));

        assert!(
            GuessRow::from_outcome(&GuessOutcome::OutOfRange {
                guess: -1,
                low: 0,
                high: 100
            })
            .is_none()
        );
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(TuiInterface::command_for('h'), Some(UserAction::Hint));
        assert_eq!(TuiInterface::command_for('S'), Some(UserAction::Strategy));
        assert_eq!(TuiInterface::command_for('?'), Some(UserAction::Help));
        assert_eq!(TuiInterface::command_for('n'), None);
        assert_eq!(TuiInterface::command_for('z'), None);
    }

    #[test]
    fn test_attempts_color_thresholds() {
        assert_eq!(TuiInterface::attempts_color(7, 7), Color::Green);
        assert_eq!(TuiInterface::attempts_color(5, 7), Color::Green);
        assert_eq!(TuiInterface::attempts_color(4, 7), Color::Rgb(255, 152, 0));
        assert_eq!(TuiInterface::attempts_color(3, 7), Color::Rgb(255, 152, 0));
        assert_eq!(TuiInterface::attempts_color(2, 7), Color::Red);
        assert_eq!(TuiInterface::attempts_color(u32::MAX, u32::MAX), Color::Green);
        assert_eq!(TuiInterface::attempts_color(1, u32::MAX), Color::Red);
    }
}
