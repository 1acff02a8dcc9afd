//! Statistics, character-class counts and bar aggregation for text columns.

use super::frequency::FrequencyCounter;
use crate::column::TextColumn;
use crate::config::ProfilerConfig;
use crate::types::{Statistic, TextProfile};
use tracing::debug;

/// Profile one text column.
pub fn profile_text(column: &TextColumn, config: &ProfilerConfig) -> TextProfile {
    let counter: FrequencyCounter<&str> = column.present().collect();
    let missing = column.values.iter().filter(|v| v.is_none()).count();

    let mut profile = TextProfile {
        name: column.name.clone(),
        row_count: column.len(),
        unique: counter.distinct(),
        missing,
        empty: 0,
        whitespace: 0,
        lowercase: 0,
        uppercase: 0,
        alphabet: 0,
        digit: 0,
        mode: counter.mode().map(|s| s.to_string()),
        bar_chart: counter.entries(|s| s.to_string()),
        frequent: counter.top_k(config.top_k, |s| s.to_string()),
    };

    for value in column.present() {
        if value.is_empty() {
            profile.empty += 1;
            continue;
        }
        if is_whitespace_only(value) {
            profile.whitespace += 1;
        }
        if is_lowercase(value) {
            profile.lowercase += 1;
        }
        if is_uppercase(value) {
            profile.uppercase += 1;
        }
        if is_alphabetic(value) {
            profile.alphabet += 1;
        }
        if is_digits(value) {
            profile.digit += 1;
        }
    }

    debug!(
        "Profiled text column '{}': {} distinct, {} missing",
        column.name, profile.unique, missing
    );

    profile
}

// =============================================================================
// Character classes
// =============================================================================

/// Non-empty and every character is whitespace.
pub fn is_whitespace_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_whitespace)
}

/// At least one cased character, and no uppercase ones.
pub fn is_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// At least one cased character, and no lowercase ones.
pub fn is_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Non-empty and letters only.
pub fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// Non-empty and ASCII decimal digits only.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl TextProfile {
    /// Number of non-missing cells.
    pub fn non_missing(&self) -> usize {
        self.row_count - self.missing
    }

    pub fn statistics(&self) -> Vec<Statistic> {
        vec![
            Statistic::count("unique", "Number of Unique Values", self.unique),
            Statistic::count(
                "missing",
                "Number of Rows with Missing Values",
                self.missing,
            ),
            Statistic::count("empty", "Number of Empty Rows", self.empty),
            Statistic::count(
                "whitespace",
                "Number of Rows with Only Whitespace",
                self.whitespace,
            ),
            Statistic::count(
                "lowercase",
                "Number of Rows with Only Lowercases",
                self.lowercase,
            ),
            Statistic::count(
                "uppercase",
                "Number of Rows with Only Uppercases",
                self.uppercase,
            ),
            Statistic::count(
                "alphabet",
                "Number of Rows with Only Alphabet",
                self.alphabet,
            ),
            Statistic::count("digit", "Number of Rows with Only Digits", self.digit),
            Statistic::new("mode", "Mode Value", self.mode.clone()),
        ]
    }
}
