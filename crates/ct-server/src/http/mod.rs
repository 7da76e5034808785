//! Local HTTP API
//! 本地 HTTP 接口

mod dto;
mod error;
mod guard;
mod handlers;
mod router;
mod state;

pub use dto::{AppliedChangesDto, HistoryItemDto};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
