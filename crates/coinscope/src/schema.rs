//! Positional layout of the extracted fields.
//!
//! Both source pages are read by fixed position (first match, third block,
//! token N of a row). The constants here are the single description of those
//! positions: extractors check arity against them and the formatter indexes
//! with them, so a page change surfaces as an extraction error rather than
//! an out-of-range access.

/// Where the boundary values of a price-history row live in its text tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Token holding the row label, `None` when the label is fixed.
    pub label: Option<usize>,
    pub low: usize,
    pub high: usize,
}

impl RowLayout {
    /// Fewest tokens a row needs for every position to resolve.
    pub const fn min_tokens(&self) -> usize {
        let mut max = if self.low > self.high { self.low } else { self.high };
        if let Some(label) = self.label {
            if label > max {
                max = label;
            }
        }
        max + 1
    }
}

/// The intraday slider: `[.., "Low:", low, .., "High:", high, ..]`.
pub const INTRADAY_ROW: RowLayout = RowLayout {
    label: None,
    low: 2,
    high: 5,
};

/// Label used for the intraday row.
pub const INTRADAY_LABEL: &str = "24h Low / 24h High ";

/// A history table row: `[label, low, "-", high, ..]`.
pub const WINDOW_ROW: RowLayout = RowLayout {
    label: Some(0),
    low: 1,
    high: 3,
};

/// Report keys of the history windows, in table order (7d, 30d, 90d, 52w).
pub const WINDOW_KEYS: [&str; 4] = ["7d", "30d", "90d", "w52"];

/// Index of the volume block among the market page's stats items.
pub const VOLUME_BLOCK: usize = 2;

/// Text fragments kept from a percent-change span (number and sign).
pub const CHANGE_TOKENS: usize = 2;

/// Position of the ordinal in the rank pill text ("Rank #1").
pub const RANK_WORD: usize = 1;

/// Position of the amount in the comparison paragraph ("1 BTC 0.000... ETH").
pub const COMPARISON_WORD: usize = 1;

/// Relative difficulty periods in page order: report key and label.
pub const DIFFICULTY_PERIODS: [(&str, &str); 4] = [
    ("1dd", "1 Day"),
    ("7dd", "7 Days"),
    ("30dd", "30 Days"),
    ("90dd", "90 Days"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_tokens() {
        assert_eq!(INTRADAY_ROW.min_tokens(), 6);
        assert_eq!(WINDOW_ROW.min_tokens(), 4);
    }

    #[test]
    fn test_one_key_per_difficulty_period() {
        let keys: std::collections::HashSet<_> =
            DIFFICULTY_PERIODS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), DIFFICULTY_PERIODS.len());
    }
}
