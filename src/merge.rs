//! Merge verse continuation paragraphs into single verse paragraphs.
//!
//! Target-script sources frequently break one verse across several
//! paragraphs. Weaving pairs paragraphs one-to-one, so every verse has to
//! be a single paragraph first.

use crate::models::{Paragraph, Run, RunStyle};

/// Prefix that opens a new verse paragraph
pub const VERSE_PREFIX: &str = "Verse";

/// A verse being accumulated
struct PendingVerse {
    text: String,
    style: RunStyle,
    template: Paragraph, // Source of paragraph-level attributes
}

impl PendingVerse {
    fn start(paragraph: &Paragraph, text: String) -> Self {
        Self {
            text,
            style: paragraph.leading_style(),
            template: paragraph.clone(),
        }
    }

    fn finish(self) -> Paragraph {
        Paragraph {
            runs: vec![Run::styled(self.text, self.style)],
            alignment: self.template.alignment,
            direction: self.template.direction,
        }
    }
}

fn flatten_lines(text: &str) -> String {
    text.trim().replace(['\r', '\n'], " ")
}

/// Merge continuation paragraphs into the verse paragraph they follow.
///
/// A paragraph whose trimmed text starts with "Verse" opens a new verse;
/// any other non-empty paragraph is appended to the open verse with a
/// single space. Blank paragraphs are dropped and line breaks inside a
/// paragraph become spaces. Text before the first verse is kept as its own
/// leading paragraph.
pub fn merge_verse_paragraphs(paragraphs: &[Paragraph]) -> Vec<Paragraph> {
    let mut merged = Vec::new();
    let mut current: Option<PendingVerse> = None;

    for paragraph in paragraphs {
        let text = flatten_lines(&paragraph.text());
        if text.is_empty() {
            continue;
        }

        if text.starts_with(VERSE_PREFIX) {
            if let Some(verse) = current.take() {
                merged.push(verse.finish());
            }
            current = Some(PendingVerse::start(paragraph, text));
        } else {
            match current.as_mut() {
                Some(verse) => {
                    verse.text.push(' ');
                    verse.text.push_str(&text);
                }
                None => current = Some(PendingVerse::start(paragraph, text)),
            }
        }
    }

    if let Some(verse) = current {
        merged.push(verse.finish());
    }

    merged
}
