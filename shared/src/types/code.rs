//! Tuition codes
//!
//! A tuition code is the human-facing identifier of a posted tuition. Codes
//! handed out by the allocator look like `ST152`; when the allocator cannot
//! find a free number it falls back to `ST<unix-millis>_<random>`.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};

/// Prefix carried by every tuition code
pub const CODE_PREFIX: &str = "ST";

/// Upper bound (exclusive) of the random suffix on fallback codes
const FALLBACK_SUFFIX_RANGE: u32 = 1000;

/// Prefix a user-supplied string with `ST` unless it already carries it.
///
/// The remainder is not inspected, so `"XY9"` becomes `"STXY9"`. Applying
/// this twice gives the same result as applying it once.
pub fn normalize_code(input: &str) -> String {
    if input.starts_with(CODE_PREFIX) {
        input.to_string()
    } else {
        format!("{CODE_PREFIX}{input}")
    }
}

/// Unique identifier assigned to a tuition at creation time
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TuitionCode(String);

impl TuitionCode {
    /// Build the sequential code for `number`, e.g. `ST110`
    pub fn from_sequence(number: u32) -> Self {
        Self(format!("{CODE_PREFIX}{number}"))
    }

    /// Build a fallback code from a millisecond timestamp and a suffix
    pub fn fallback(timestamp_millis: i64, suffix: u32) -> Self {
        Self(format!("{CODE_PREFIX}{timestamp_millis}_{suffix}"))
    }

    /// Build a fallback code from the current time and a random suffix.
    ///
    /// No uniqueness check is made; collisions are possible but unlikely.
    pub fn fallback_now() -> Self {
        let suffix = rand::thread_rng().gen_range(0..FALLBACK_SUFFIX_RANGE);
        Self::fallback(Utc::now().timestamp_millis(), suffix)
    }

    /// Parse user input into a code.
    ///
    /// Surrounding whitespace is dropped and the `ST` prefix added when
    /// missing. Empty input, a bare prefix, or embedded whitespace and path
    /// separators are rejected.
    pub fn parse(input: &str) -> SharedResult<Self> {
        let trimmed = input.trim();
        let normalized = normalize_code(trimmed);
        let remainder = &normalized[CODE_PREFIX.len()..];

        if remainder.is_empty()
            || remainder
                .chars()
                .any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(SharedError::InvalidCode {
                input: input.to_string(),
            });
        }

        Ok(Self(normalized))
    }

    /// Numeric part of a sequential code.
    ///
    /// Returns `None` for fallback codes and for anything whose remainder is
    /// not purely decimal digits.
    pub fn sequence_number(&self) -> Option<u32> {
        let digits = self.0.strip_prefix(CODE_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Whether this code came from the timestamp fallback path
    pub fn is_fallback(&self) -> bool {
        self.0
            .strip_prefix(CODE_PREFIX)
            .and_then(|rest| rest.split_once('_'))
            .map(|(ts, suffix)| {
                !ts.is_empty()
                    && !suffix.is_empty()
                    && ts.bytes().all(|b| b.is_ascii_digit())
                    && suffix.bytes().all(|b| b.is_ascii_digit())
            })
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TuitionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TuitionCode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TuitionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("123"), "ST123");
        assert_eq!(normalize_code("ST55"), "ST55");
        assert_eq!(normalize_code("XY9"), "STXY9");
    }

    #[test]
    fn test_normalize_code_is_idempotent() {
        for input in ["123", "ST55", "XY9", "", "st7"] {
            let once = normalize_code(input);
            assert_eq!(normalize_code(&once), once);
        }
    }

    #[test]
    fn test_normalize_does_not_fold_case() {
        assert_eq!(normalize_code("st7"), "STst7");
    }

    #[test]
    fn test_sequential_code() {
        let code = TuitionCode::from_sequence(110);
        assert_eq!(code.as_str(), "ST110");
        assert_eq!(code.sequence_number(), Some(110));
        assert!(!code.is_fallback());
    }

    #[test]
    fn test_fallback_code_shape() {
        let pattern = Regex::new(r"^ST\d{10,}_\d+$").unwrap();
        let code = TuitionCode::fallback_now();

        assert!(pattern.is_match(code.as_str()), "unexpected fallback: {code}");
        assert!(code.is_fallback());
        assert_eq!(code.sequence_number(), None);
    }

    #[test]
    fn test_fallback_from_parts() {
        let code = TuitionCode::fallback(1_700_000_000_000, 42);
        assert_eq!(code.as_str(), "ST1700000000000_42");
    }

    #[test]
    fn test_parse_adds_prefix_and_trims() {
        assert_eq!(TuitionCode::parse(" 152 ").unwrap().as_str(), "ST152");
        assert_eq!("ST152".parse::<TuitionCode>().unwrap().as_str(), "ST152");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TuitionCode::parse("").is_err());
        assert!(TuitionCode::parse("   ").is_err());
        assert!(TuitionCode::parse("ST").is_err());
        assert!(TuitionCode::parse("ST1 2").is_err());
        assert!(TuitionCode::parse("../etc").is_err());
    }

    #[test]
    fn test_sequence_number_rejects_non_digits() {
        assert_eq!(TuitionCode::parse("XY9").unwrap().sequence_number(), None);
        assert_eq!(TuitionCode::parse("ST-5").unwrap().sequence_number(), None);
    }

    #[test]
    fn test_serde_is_transparent() {
        let code = TuitionCode::from_sequence(151);
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"ST151\"");

        let parsed: TuitionCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }
}
