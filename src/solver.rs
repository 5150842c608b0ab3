use std::fmt;

/// Extra advice attached to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionNote {
    /// Nothing guessed yet: open in the middle.
    OpenWithMidpoint,
    /// Only a handful of values remain.
    VeryClose,
}

/// Recommended next guess for the player's current knowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub guess: i32,
    pub lower_bound: i32,
    pub upper_bound: i32,
    pub note: Option<SuggestionNote>,
}

/// Threshold at or below which the remaining range counts as "very close".
pub const CLOSE_RANGE: i64 = 3;

impl Suggestion {
    /// How many values are still possible.
    #[must_use]
    pub fn range_width(&self) -> i64 {
        i64::from(self.upper_bound) - i64::from(self.lower_bound) + 1
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategic suggestion: try {}", self.guess)?;
        writeln!(
            f,
            "This splits the remaining {} possibilities in half.",
            self.range_width()
        )?;
        write!(
            f,
            "Current range: {} to {}",
            self.lower_bound, self.upper_bound
        )?;
        match self.note {
            Some(SuggestionNote::OpenWithMidpoint) => {
                write!(f, "\nBinary search tip: start in the middle to halve the range!")
            }
            Some(SuggestionNote::VeryClose) => {
                write!(f, "\nYou're very close! Only a few numbers left!")
            }
            None => Ok(()),
        }
    }
}

/// Pick the next guess by halving `lower..=upper`.
///
/// Prefers the midpoint, then its right and left neighbours, then the first
/// unguessed value in the range. If every value has been guessed the
/// midpoint is returned anyway.
#[must_use]
pub fn recommend_guess(lower: i32, upper: i32, history: &[i32]) -> i32 {
    let mid = (i64::from(lower) + i64::from(upper)).div_euclid(2);
    // The mean of two i32 values is itself an i32.
    let mid = i32::try_from(mid).unwrap_or(lower);
    let available = |n: i32| (lower..=upper).contains(&n) && !history.contains(&n);

    if !history.contains(&mid) {
        return mid;
    }
    if let Some(next) = mid.checked_add(1).filter(|&n| available(n)) {
        return next;
    }
    if let Some(prev) = mid.checked_sub(1).filter(|&n| available(n)) {
        return prev;
    }
    (lower..=upper)
        .find(|n| !history.contains(n))
        .unwrap_or(mid)
}

/// Build the full suggestion shown to the player.
#[must_use]
pub fn strategic_suggestion(lower: i32, upper: i32, history: &[i32]) -> Suggestion {
    let guess = recommend_guess(lower, upper, history);
    let mut suggestion = Suggestion {
        guess,
        lower_bound: lower,
        upper_bound: upper,
        note: None,
    };
    suggestion.note = if history.is_empty() {
        Some(SuggestionNote::OpenWithMidpoint)
    } else if suggestion.range_width() <= CLOSE_RANGE {
        Some(SuggestionNote::VeryClose)
    } else {
        None
    };
    suggestion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_guess_is_midpoint() {
        assert_eq!(recommend_guess(0, 100, &[]), 50);
        assert_eq!(recommend_guess(0, 99, &[]), 49);
    }

    #[test]
    fn test_guessed_midpoint_moves_forward() {
        assert_eq!(recommend_guess(25, 75, &[50, 62]), 51);
    }

    #[test]
    fn test_guessed_midpoint_and_successor_moves_back() {
        assert_eq!(recommend_guess(25, 75, &[50, 51]), 49);
    }

    #[test]
    fn test_taken_neighbours_fall_back_to_scan() {
        assert_eq!(recommend_guess(8, 12, &[10, 11, 9]), 8);
    }

    #[test]
    fn test_neighbour_outside_bounds_is_skipped() {
        // mid = 9, 10 is past the upper bound.
        assert_eq!(recommend_guess(9, 9, &[9]), 9);
        assert_eq!(recommend_guess(8, 9, &[8]), 9);
        assert_eq!(recommend_guess(8, 9, &[8, 9]), 8);
    }

    #[test]
    fn test_everything_guessed_returns_midpoint() {
        assert_eq!(recommend_guess(4, 6, &[4, 5, 6]), 5);
    }

    #[test]
    fn test_negative_bounds_use_floor() {
        assert_eq!(recommend_guess(-3, 0, &[]), -2);
    }

    #[test]
    fn test_suggestion_notes() {
        let opening = strategic_suggestion(0, 100, &[]);
        assert_eq!(opening.note, Some(SuggestionNote::OpenWithMidpoint));
        assert_eq!(opening.range_width(), 101);

        let close = strategic_suggestion(40, 42, &[39]);
        assert_eq!(close.note, Some(SuggestionNote::VeryClose));
        assert_eq!(close.guess, 41);

        let middle = strategic_suggestion(10, 90, &[9]);
        assert_eq!(middle.note, None);
    }

    #[test]
    fn test_suggestion_text() {
        let text = strategic_suggestion(25, 75, &[50, 62]).to_string();
        assert!(text.contains("try 51"));
        assert!(text.contains("remaining 51 possibilities"));
        assert!(text.contains("Current range: 25 to 75"));
    }
}
