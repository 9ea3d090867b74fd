//! Separator normalization passes.
//!
//! Two independent, idempotent passes over a paragraph's full text:
//! collapsing runs of separators ("::" -> ":") and guaranteeing exactly one
//! trailing separator. Paragraph-level helpers rewrite the runs only when
//! the text actually changes.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::marker::reposition_paragraph;
use crate::models::{Paragraph, ScriptStyle, SEPARATOR};
use crate::script::is_target_script;

/// Replace every run of two or more separators with a single separator.
pub fn collapse_double_separator(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_was_separator = false;

    for c in text.chars() {
        if c == SEPARATOR {
            if !prev_was_separator {
                out.push(c);
            }
            prev_was_separator = true;
        } else {
            out.push(c);
            prev_was_separator = false;
        }
    }

    out
}

/// Strip trailing separators and the whitespace between them.
pub(crate) fn strip_trailing_separators(text: &str) -> &str {
    text.trim_end_matches(|c: char| c == SEPARATOR || c.is_whitespace())
}

/// Make `text` end with exactly one separator.
///
/// Any number of trailing separators (with whitespace between them) are
/// folded into one. Blank text is returned unchanged.
pub fn ensure_single_trailing_separator(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    let mut out = strip_trailing_separators(text).to_string();
    out.push(SEPARATOR);
    out
}

/// Apply `collapse_double_separator` to a paragraph. Returns whether the
/// paragraph changed.
pub fn collapse_paragraph(paragraph: &mut Paragraph) -> bool {
    let text = paragraph.text();
    let collapsed = collapse_double_separator(&text);
    let changed = paragraph.rewrite_text(collapsed);
    if changed {
        trace!("collapsed separators in {:?}", text);
    }
    changed
}

/// Counters from a post-processing pass over a woven document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub paragraphs: usize,
    pub hebrew_paragraphs: usize, // Paragraphs given the source-script style
    pub separators_collapsed: usize,
    pub markers_repositioned: usize,
}

/// Normalize an already-woven document in place.
///
/// Every paragraph has its separator runs collapsed. Paragraphs containing
/// Hebrew additionally take `hebrew_style` (alignment, direction, font) and
/// are marker-repositioned. Running it twice changes nothing the second
/// time.
pub fn normalize_document(
    paragraphs: &mut [Paragraph],
    hebrew_style: &ScriptStyle,
) -> NormalizeReport {
    let mut report = NormalizeReport {
        paragraphs: paragraphs.len(),
        ..Default::default()
    };

    for paragraph in paragraphs.iter_mut() {
        if collapse_paragraph(paragraph) {
            report.separators_collapsed += 1;
        }

        if is_target_script(&paragraph.text()) {
            paragraph.apply_style(hebrew_style);
            report.hebrew_paragraphs += 1;
            if reposition_paragraph(paragraph) {
                report.markers_repositioned += 1;
            }
        }
    }

    report
}
