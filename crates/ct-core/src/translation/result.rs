use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Direction;

/// Prefix written in place of a translation when the provider call failed.
pub const FAILURE_PREFIX: &str = "翻译失败: ";

/// One captured clipboard text, ready to be translated.
///
/// Created per trigger firing and consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    direction: Direction,
}

impl TranslationRequest {
    /// Returns `None` for empty text, which never becomes a job.
    pub fn new(text: impl Into<String>, direction: Direction) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }
        Some(Self { text, direction })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// A finished job as stored in history.
///
/// The timestamp carries whole-second precision so that a stored entry
/// reads back equal to what was appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub id: String,
    pub original: String,
    pub translated: String,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
}

impl TranslationResult {
    /// Build a result stamped at `now_ms` (milliseconds since the Unix epoch).
    pub fn new(
        original: impl Into<String>,
        translated: impl Into<String>,
        direction: Direction,
        now_ms: i64,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            original: original.into(),
            translated: translated.into(),
            direction,
            timestamp: DateTime::from_timestamp(now_ms.div_euclid(1000), 0).unwrap_or_default(),
        }
    }

    /// Build the history entry for a failed provider call.
    pub fn failed(
        original: impl Into<String>,
        direction: Direction,
        error: &dyn fmt::Display,
        now_ms: i64,
    ) -> Self {
        Self::new(original, format!("{FAILURE_PREFIX}{error}"), direction, now_ms)
    }

    pub fn is_failure(&self) -> bool {
        self.translated.starts_with(FAILURE_PREFIX)
    }

    pub fn timestamp_secs(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_not_a_request() {
        assert!(TranslationRequest::new("", Direction::ToChinese).is_none());
        let request = TranslationRequest::new("hi", Direction::ToChinese).unwrap();
        assert_eq!(request.text(), "hi");
    }

    #[test]
    fn timestamp_drops_sub_second_precision() {
        let result = TranslationResult::new("a", "b", Direction::ToChinese, 1_700_000_000_987);
        assert_eq!(result.timestamp_secs(), 1_700_000_000);
        assert_eq!(result.timestamp.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn failed_result_carries_error_text() {
        let result = TranslationResult::failed("hello", Direction::ToChinese, &"timeout", 0);
        assert_eq!(result.translated, "翻译失败: timeout");
        assert!(result.is_failure());
    }

    #[test]
    fn ids_are_unique() {
        let a = TranslationResult::new("a", "b", Direction::ToChinese, 0);
        let b = TranslationResult::new("a", "b", Direction::ToChinese, 0);
        assert_ne!(a.id, b.id);
    }
}
