//! Script detection by Unicode block.
//!
//! Decides whether a fragment of text belongs to the right-to-left stream,
//! which in turn drives direction, font, and marker handling.

use serde::{Deserialize, Serialize};

/// An inclusive range of code points identifying one script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    pub start: char,
    pub end: char,
}

impl ScriptRange {
    /// Hebrew block, U+0590..=U+05FF (letters, points, cantillation, punctuation)
    pub const HEBREW: ScriptRange = ScriptRange {
        start: '\u{0590}',
        end: '\u{05FF}',
    };

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    /// True if any code point of `text` falls inside the range.
    pub fn detect(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }
}

/// True if `text` contains at least one Hebrew code point.
///
/// Total: the empty string is simply not Hebrew.
pub fn is_target_script(text: &str) -> bool {
    ScriptRange::HEBREW.detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_target_script() {
        assert!(!is_target_script(""));
    }

    #[test]
    fn test_latin_is_not_target_script() {
        assert!(!is_target_script("Genesis 1:1 In the beginning"));
    }

    #[test]
    fn test_single_hebrew_letter_is_enough() {
        assert!(is_target_script("Verse 1 (א)"));
        assert!(is_target_script("בְּרֵאשִׁית בָּרָא"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(is_target_script("\u{0590}"));
        assert!(is_target_script("\u{05FF}"));
        assert!(!is_target_script("\u{058F}"));
        assert!(!is_target_script("\u{0600}")); // Arabic block
    }

    #[test]
    fn test_direction_marks_alone_are_not_hebrew() {
        assert!(!is_target_script("\u{200F}\u{202A}:"));
    }

    #[test]
    fn test_custom_range() {
        let arabic = ScriptRange {
            start: '\u{0600}',
            end: '\u{06FF}',
        };
        assert!(arabic.detect("بسم الله"));
        assert!(!arabic.detect("שלום"));
    }
}
