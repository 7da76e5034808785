//! Response DTOs
//! 响应数据传输对象

use chrono::{DateTime, Utc};
use ct_app::usecases::AppliedChanges;
use ct_app::Swap;
use ct_core::{Direction, TranslationResult};
use serde::Serialize;

/// One history entry as the web UI renders it.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryItemDto {
    pub id: String,
    pub original: String,
    pub translated: String,
    pub direction: Direction,
    pub direction_label: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl From<TranslationResult> for HistoryItemDto {
    fn from(result: TranslationResult) -> Self {
        Self {
            direction_label: result.direction.label(),
            id: result.id,
            original: result.original,
            translated: result.translated,
            direction: result.direction,
            timestamp: result.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AppliedChangesDto {
    pub hotkey_rebound: bool,
    pub provider_swapped: bool,
    pub store_swapped: bool,
}

impl From<AppliedChanges> for AppliedChangesDto {
    fn from(applied: AppliedChanges) -> Self {
        Self {
            hotkey_rebound: applied.hotkey_rebound,
            provider_swapped: applied.provider == Swap::Swapped,
            store_swapped: applied.store == Swap::Swapped,
        }
    }
}
