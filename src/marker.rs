//! Verse marker extraction and repositioning.
//!
//! Scraped source-script lines carry their verse number as a parenthesized
//! token wrapped in direction-control characters, somewhere inside the
//! line: `בראשית ברא \u{202A}(א)\u{202A}:`. Repositioning moves the token
//! to the front and rebuilds the line in a canonical marker-first form:
//!
//! ```text
//! RLM numeral RLM "  " RLM body RLM ":" RLM
//! ```
//!
//! The right-to-left marks pin the numeral and the trailing separator to
//! the right places when the line is rendered next to left-to-right text.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Paragraph, MARKER_DELIMITER, RTL_MARK, SEPARATOR};
use crate::punctuation::ensure_single_trailing_separator;

/// Delimiter, optional space, "(", body without parentheses, ")", optional
/// space, delimiter.
static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x{202A}\s?\(([^()]+)\)\s?\x{202A}").expect("Invalid verse marker regex")
});

/// A verse number lifted out of a source-script line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseMarker {
    pub raw: String,     // Parenthesized form as found, e.g. "(כח)"
    pub numeral: String, // Token between the parentheses, whitespace-trimmed
}

impl VerseMarker {
    /// Numeric value of a Hebrew-letter numeral (כח = 28, ט"ו = 15).
    ///
    /// Geresh, gershayim, ASCII quotes and vowel points are ignored. Returns
    /// None if any other character is present or no letter is found.
    pub fn value(&self) -> Option<u32> {
        let mut total = 0;
        let mut letters = 0;

        for c in self.numeral.chars() {
            if matches!(c, '\'' | '"' | '\u{05F3}' | '\u{05F4}' | '\u{0591}'..='\u{05C7}') {
                continue;
            }
            total += hebrew_letter_value(c)?;
            letters += 1;
        }

        (letters > 0).then_some(total)
    }
}

fn hebrew_letter_value(c: char) -> Option<u32> {
    let value = match c {
        'א' => 1,
        'ב' => 2,
        'ג' => 3,
        'ד' => 4,
        'ה' => 5,
        'ו' => 6,
        'ז' => 7,
        'ח' => 8,
        'ט' => 9,
        'י' => 10,
        'כ' | 'ך' => 20,
        'ל' => 30,
        'מ' | 'ם' => 40,
        'נ' | 'ן' => 50,
        'ס' => 60,
        'ע' => 70,
        'פ' | 'ף' => 80,
        'צ' | 'ץ' => 90,
        'ק' => 100,
        'ר' => 200,
        'ש' => 300,
        'ת' => 400,
        _ => return None,
    };
    Some(value)
}

/// Separate an embedded verse marker from the rest of the line.
///
/// The first marker in the line supplies the numeral. Every marker span is
/// removed from the remainder, which is then trimmed and loses one trailing
/// separator if present. A line without a well-formed marker comes back
/// unchanged with `None`.
pub fn extract_marker(line: &str) -> (Option<VerseMarker>, String) {
    let Some(caps) = MARKER_PATTERN.captures(line) else {
        return (None, line.to_string());
    };

    let marker = VerseMarker {
        raw: caps[0]
            .trim_matches(|c: char| c == MARKER_DELIMITER || c.is_whitespace())
            .to_string(),
        numeral: caps[1].trim().to_string(),
    };

    let mut remainder = line.to_string();
    while let Some(m) = MARKER_PATTERN.find(&remainder) {
        remainder.replace_range(m.range(), "");
    }

    let trimmed = remainder.trim();
    let remainder = trimmed
        .strip_suffix(SEPARATOR)
        .unwrap_or(trimmed)
        .trim_end()
        .to_string();

    (Some(marker), remainder)
}

/// Build the canonical marker-first line.
pub fn canonical_line(numeral: &str, remainder: &str) -> String {
    let terminated = ensure_single_trailing_separator(remainder);
    let body = terminated.strip_suffix(SEPARATOR).unwrap_or(&terminated);

    format!(
        "{m}{numeral}{m}  {m}{body}{m}{sep}{m}",
        m = RTL_MARK,
        numeral = numeral,
        body = body,
        sep = SEPARATOR,
    )
}

/// Move the embedded verse marker of `line` to the front.
///
/// Lines without a marker pass through byte-for-byte. Output lines contain
/// no marker pattern, so a second call is a no-op.
pub fn reposition(line: &str) -> String {
    match extract_marker(line) {
        (Some(marker), remainder) => canonical_line(&marker.numeral, &remainder),
        (None, _) => line.to_string(),
    }
}

/// Reposition the marker of a paragraph in place. Returns whether the
/// paragraph changed.
pub fn reposition_paragraph(paragraph: &mut Paragraph) -> bool {
    let text = paragraph.text();
    match extract_marker(&text) {
        (Some(marker), remainder) => {
            debug!("verse marker {} moved to line start", marker.raw);
            paragraph.rewrite_text(canonical_line(&marker.numeral, &remainder))
        }
        (None, _) => {
            trace!("no verse marker in {:?}", text);
            false
        }
    }
}
