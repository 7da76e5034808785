//! Translation domain types
//! 翻译领域模型

mod direction;
mod result;

pub use direction::{Direction, ParseDirectionError};
pub use result::{TranslationRequest, TranslationResult, FAILURE_PREFIX};
