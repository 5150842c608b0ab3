use std::fmt;

use crate::config::GameConfig;
use crate::error::RoundCountError;

/// A run of rounds with aggregated results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    rounds_total: u32,
    /// 1-based index of the round being played. Moves past `rounds_total`
    /// once the last round ends.
    current_round: u32,
    wins: u32,
}

impl Session {
    pub fn new(rounds_total: u32, config: &GameConfig) -> Result<Self, RoundCountError> {
        if rounds_total == 0 {
            return Err(RoundCountError::BelowMinimum);
        }
        if rounds_total > config.max_rounds {
            return Err(RoundCountError::AboveMaximum {
                max: config.max_rounds,
            });
        }
        Ok(Self {
            rounds_total,
            current_round: 1,
            wins: 0,
        })
    }

    /// Close the current round and move the index forward.
    pub fn record_round(&mut self, won: bool) {
        if won {
            self.wins += 1;
        }
        self.current_round += 1;
    }

    #[must_use]
    pub fn rounds_total(&self) -> u32 {
        self.rounds_total
    }

    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Round number to show the player, never past the last round.
    #[must_use]
    pub fn display_round(&self) -> u32 {
        self.current_round.min(self.rounds_total)
    }

    #[must_use]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    #[must_use]
    pub fn rounds_completed(&self) -> u32 {
        self.current_round.saturating_sub(1)
    }

    #[must_use]
    pub fn losses(&self) -> u32 {
        self.rounds_completed() - self.wins
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rounds_completed() >= self.rounds_total
    }

    /// Percentage of completed rounds that were won, 0.0 before any finish.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let completed = self.rounds_completed();
        if completed == 0 {
            0.0
        } else {
            100.0 * f64::from(self.wins) / f64::from(completed)
        }
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        let win_rate = self.win_rate();
        SessionStats {
            wins: self.wins,
            losses: self.losses(),
            rounds_completed: self.rounds_completed(),
            rounds_total: self.rounds_total,
            win_rate,
            rating: PerformanceRating::from_win_rate(win_rate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceRating {
    Excellent,
    Good,
    KeepPracticing,
}

impl PerformanceRating {
    #[must_use]
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate >= 75.0 {
            Self::Excellent
        } else if win_rate >= 50.0 {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Excellent => "Excellent performance!",
            Self::Good => "Good job!",
            Self::KeepPracticing => "Keep practicing!",
        };
        f.write_str(text)
    }
}

/// Snapshot of a session's results for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub wins: u32,
    pub losses: u32,
    pub rounds_completed: u32,
    pub rounds_total: u32,
    pub win_rate: f64,
    pub rating: PerformanceRating,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game Statistics")?;
        writeln!(f, "Wins: {}", self.wins)?;
        writeln!(f, "Losses: {}", self.losses)?;
        writeln!(
            f,
            "Rounds played: {} of {}",
            self.rounds_completed, self.rounds_total
        )?;
        writeln!(f, "Win Rate: {:.1}%", self.win_rate)?;
        write!(f, "{}", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rounds: u32) -> Session {
        Session::new(rounds, &GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_session() {
        let s = session(3);
        assert_eq!(s.current_round(), 1);
        assert_eq!(s.wins(), 0);
        assert_eq!(s.rounds_completed(), 0);
        assert!(!s.is_complete());
        assert_eq!(s.win_rate(), 0.0);
    }

    #[test]
    fn test_round_count_bounds() {
        let config = GameConfig::default();
        assert_eq!(Session::new(0, &config), Err(RoundCountError::BelowMinimum));
        assert_eq!(
            Session::new(1000, &config),
            Err(RoundCountError::AboveMaximum { max: 999 })
        );
        assert!(Session::new(999, &config).is_ok());
    }

    #[test]
    fn test_win_rate_seven_of_ten() {
        let mut s = session(10);
        for i in 0..10 {
            s.record_round(i < 7);
        }
        assert_eq!(s.current_round(), 11);
        assert_eq!(s.win_rate(), 70.0);
        assert_eq!(s.losses(), 3);
        assert!(s.is_complete());
    }

    #[test]
    fn test_display_round_is_capped() {
        let mut s = session(2);
        s.record_round(true);
        assert_eq!(s.display_round(), 2);
        s.record_round(false);
        assert_eq!(s.current_round(), 3);
        assert_eq!(s.display_round(), 2);
    }

    #[test]
    fn test_wins_never_exceed_completed() {
        let mut s = session(5);
        for _ in 0..5 {
            s.record_round(true);
            assert!(s.wins() <= s.rounds_completed());
        }
        assert_eq!(s.win_rate(), 100.0);
    }

    #[test]
    fn test_ratings() {
        assert_eq!(PerformanceRating::from_win_rate(75.0), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_win_rate(74.9), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_win_rate(50.0), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_win_rate(10.0), PerformanceRating::KeepPracticing);
    }

    #[test]
    fn test_stats_text() {
        let mut s = session(4);
        s.record_round(true);
        s.record_round(false);
        let text = s.stats().to_string();
        assert!(text.contains("Wins: 1"));
        assert!(text.contains("Rounds played: 2 of 4"));
        assert!(text.contains("Win Rate: 50.0%"));
        assert!(text.contains("Good job!"));
    }
}
