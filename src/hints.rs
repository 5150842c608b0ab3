//! Progressive hints about where the secret lies.
//!
//! Each hint level splits the whole play range into finer fixed segments.
//! The split never follows the player's narrowed bounds: a hint tells the
//! absolute position of the secret, not its position within what is left.

use std::fmt;

use crate::config::GameConfig;

/// Boundaries on the 0..=100 scale, one table per hint level.
const HALVES: &[i64] = &[50];
const QUARTERS: &[i64] = &[25, 50, 75];
const EIGHTHS: &[i64] = &[13, 25, 38, 50, 63, 75, 88];
const SIXTEENTHS: &[i64] = &[7, 13, 19, 25, 31, 38, 44, 50, 56, 63, 69, 75, 81, 88, 94];

const SCALE: i64 = 100;

fn boundaries_for(level: u32) -> &'static [i64] {
    match level {
        0 => HALVES,
        1 => QUARTERS,
        2 => EIGHTHS,
        _ => SIXTEENTHS,
    }
}

/// A disclosed segment of the play range containing the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub level: u32,
    /// Inclusive lower end of the segment.
    pub lower: i32,
    /// Inclusive upper end of the segment.
    pub upper: i32,
    /// Set only for the first hint, which is phrased against one threshold.
    pub threshold: Option<i32>,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.threshold {
            Some(t) if self.upper < t => write!(f, "The number is below {t}"),
            Some(t) => write!(f, "The number is {t} or above"),
            None => write!(
                f,
                "The number is between {} and {}",
                self.lower, self.upper
            ),
        }
    }
}

/// Map a 0..=100 boundary onto the configured range.
fn scale_boundary(boundary: i64, config: &GameConfig) -> i64 {
    let low = i64::from(config.low);
    let span = i64::from(config.high) - low;
    low + (boundary * span).div_euclid(SCALE)
}

/// Describe where `secret` lies at the given hint `level`.
#[must_use]
pub fn generate_hint(secret: i32, level: u32, config: &GameConfig) -> Hint {
    let secret_wide = i64::from(secret);
    let mut edges = Vec::with_capacity(boundaries_for(level).len() + 2);
    edges.push(i64::from(config.low));
    edges.extend(
        boundaries_for(level)
            .iter()
            .map(|&b| scale_boundary(b, config)),
    );
    edges.push(i64::from(config.high) + 1);

    // Inner edges at or below the secret decide its segment.
    let segment = edges[1..edges.len() - 1].partition_point(|&edge| edge <= secret_wide);
    let lower = edges[segment];
    let upper = edges[segment + 1] - 1;

    let threshold = (level == 0).then(|| edges[1]);

    // lower and upper both lie in config.low..=config.high.
    Hint {
        level,
        lower: i32::try_from(lower).unwrap_or(config.low),
        upper: i32::try_from(upper).unwrap_or(config.high),
        threshold: threshold.and_then(|t| i32::try_from(t).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(secret: i32, level: u32) -> Hint {
        generate_hint(secret, level, &GameConfig::default())
    }

    #[test]
    fn test_first_hint_halves() {
        assert_eq!(hint(25, 0).to_string(), "The number is below 50");
        assert_eq!(hint(75, 0).to_string(), "The number is 50 or above");
        assert_eq!(hint(50, 0).to_string(), "The number is 50 or above");
        assert_eq!(hint(49, 0).to_string(), "The number is below 50");
        assert_eq!(hint(0, 0).to_string(), "The number is below 50");
        assert_eq!(hint(100, 0).to_string(), "The number is 50 or above");
    }

    #[test]
    fn test_first_hint_segments() {
        let low = hint(10, 0);
        assert_eq!((low.lower, low.upper), (0, 49));
        let high = hint(50, 0);
        assert_eq!((high.lower, high.upper), (50, 100));
    }

    #[test]
    fn test_quartiles() {
        assert_eq!(hint(0, 1).to_string(), "The number is between 0 and 24");
        assert_eq!(hint(24, 1).to_string(), "The number is between 0 and 24");
        assert_eq!(hint(25, 1).to_string(), "The number is between 25 and 49");
        assert_eq!(hint(60, 1).to_string(), "The number is between 50 and 74");
        assert_eq!(hint(100, 1).to_string(), "The number is between 75 and 100");
    }

    #[test]
    fn test_eighths() {
        assert_eq!(hint(12, 2).to_string(), "The number is between 0 and 12");
        assert_eq!(hint(13, 2).to_string(), "The number is between 13 and 24");
        assert_eq!(hint(37, 2).to_string(), "The number is between 25 and 37");
        assert_eq!(hint(38, 2).to_string(), "The number is between 38 and 49");
        assert_eq!(hint(87, 2).to_string(), "The number is between 75 and 87");
        assert_eq!(hint(88, 2).to_string(), "The number is between 88 and 100");
    }

    #[test]
    fn test_sixteenths_and_beyond() {
        assert_eq!(hint(6, 3).to_string(), "The number is between 0 and 6");
        assert_eq!(hint(7, 3).to_string(), "The number is between 7 and 12");
        assert_eq!(hint(43, 3).to_string(), "The number is between 38 and 43");
        assert_eq!(hint(94, 3).to_string(), "The number is between 94 and 100");
        // Levels past the last table reuse the finest split.
        assert_eq!(hint(94, 7), Hint { level: 7, ..hint(94, 3) });
    }

    #[test]
    fn test_every_secret_is_inside_its_segment() {
        for level in 0..5 {
            for secret in 0..=100 {
                let h = hint(secret, level);
                assert!(h.lower <= secret && secret <= h.upper, "{secret} at {level}: {h:?}");
            }
        }
    }

    #[test]
    fn test_scaled_range() {
        let config = GameConfig {
            low: 0,
            high: 200,
            ..GameConfig::default()
        };
        let h = generate_hint(99, 0, &config);
        assert_eq!(h.to_string(), "The number is below 100");
        let h = generate_hint(100, 1, &config);
        assert_eq!((h.lower, h.upper), (100, 149));
    }

    #[test]
    fn test_tiny_range_never_panics() {
        let config = GameConfig {
            low: 3,
            high: 4,
            ..GameConfig::default()
        };
        for level in 0..4 {
            for secret in 3..=4 {
                let h = generate_hint(secret, level, &config);
                assert!(h.lower <= secret && secret <= h.upper);
            }
        }
    }
}
