//! Language direction heuristic.
//!
//! Counts CJK ideographs against ASCII letters. This is not language
//! identification; it only picks which way to translate.

use crate::translation::Direction;

/// Unified ideographs, extensions A through E, and both compatibility blocks.
const CJK_RANGES: [(u32, u32); 8] = [
    (0x4E00, 0x9FFF),
    (0x3400, 0x4DBF),
    (0x20000, 0x2A6DF),
    (0x2A700, 0x2B73F),
    (0x2B740, 0x2B81F),
    (0x2B820, 0x2CEAF),
    (0xF900, 0xFAFF),
    (0x2F800, 0x2FA1F),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageCounts {
    pub cjk: usize,
    pub latin: usize,
}

impl LanguageCounts {
    pub fn direction(&self) -> Direction {
        if self.cjk > 0 && self.cjk >= self.latin / 2 {
            Direction::ToEnglish
        } else {
            Direction::ToChinese
        }
    }
}

fn is_cjk(c: char) -> bool {
    let cp = c as u32;
    CJK_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

pub fn detect_counts(text: &str) -> LanguageCounts {
    text.chars().fold(LanguageCounts::default(), |mut counts, c| {
        if is_cjk(c) {
            counts.cjk += 1;
        } else if c.is_ascii_alphabetic() {
            counts.latin += 1;
        }
        counts
    })
}

/// Chinese-dominant text translates to English; anything else to Chinese.
pub fn detect(text: &str) -> Direction {
    detect_counts(text).direction()
}
