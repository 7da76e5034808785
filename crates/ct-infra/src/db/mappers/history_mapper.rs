use anyhow::{anyhow, Result};
use chrono::DateTime;
use ct_core::translation::{Direction, TranslationResult};

use crate::db::models::HistoryRow;

/// Converts between [`TranslationResult`] and the `history` row.
/// Timestamps are stored as whole epoch seconds.
pub struct HistoryRowMapper;

impl HistoryRowMapper {
    pub fn to_row(result: &TranslationResult) -> HistoryRow {
        HistoryRow {
            id: result.id.clone(),
            original: result.original.clone(),
            translated: result.translated.clone(),
            direction: result.direction.as_str().to_string(),
            timestamp: result.timestamp_secs(),
        }
    }

    pub fn to_domain(row: &HistoryRow) -> Result<TranslationResult> {
        let direction: Direction = row.direction.parse()?;
        let timestamp = DateTime::from_timestamp(row.timestamp, 0)
            .ok_or_else(|| anyhow!("timestamp out of range: {}", row.timestamp))?;

        Ok(TranslationResult {
            id: row.id.clone(),
            original: row.original.clone(),
            translated: row.translated.clone(),
            direction,
            timestamp,
        })
    }
}
