use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const TO_ENGLISH_INSTRUCTION: &str = "你是一个专业的中英文翻译助手，请将用户输入的中文内容翻译成英文，只需给出翻译结果，不要输出多余内容。";
const TO_CHINESE_INSTRUCTION: &str = "你是一个专业的英中文翻译助手，请将用户输入的英文内容翻译成中文，只需给出翻译结果，不要输出多余内容。";

/// Inferred translation direction.
///
/// `ToEnglish` is chosen for Chinese-dominant text, `ToChinese` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToEnglish,
    ToChinese,
}

impl Direction {
    /// Stable tag used in the persisted layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToEnglish => "to_english",
            Direction::ToChinese => "to_chinese",
        }
    }

    /// Short label shown in notification titles.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::ToEnglish => "中 → 英",
            Direction::ToChinese => "英 → 中",
        }
    }

    /// Fixed system instruction sent to every provider for this direction.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Direction::ToEnglish => TO_ENGLISH_INSTRUCTION,
            Direction::ToChinese => TO_CHINESE_INSTRUCTION,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown translation direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_english" => Ok(Direction::ToEnglish),
            "to_chinese" => Ok(Direction::ToChinese),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}
