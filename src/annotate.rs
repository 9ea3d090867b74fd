//! Study notes and heading cleanup for woven documents.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{Direction, Paragraph, Rgb, Run, RunStyle, TextAlignment};

/// Keyword identifying the chapter heading paragraph
pub const CHAPTER_KEYWORD: &str = "Chapter";

static VERSE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Verse (\d+)").expect("Invalid verse number regex"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("No heading containing 'Chapter' found in the document")]
    MissingChapterHeading,
}

/// Text of the notes placeholder for one verse
pub fn notes_text(heading: &str, verse: &str) -> String {
    format!("[notes]( {} Verse {} )[end_notes]", heading, verse)
}

fn notes_paragraph(heading: &str, verse: &str) -> Paragraph {
    Paragraph {
        runs: vec![Run::styled(
            notes_text(heading, verse),
            RunStyle {
                italic: true,
                color: Some(Rgb::LIGHT_GREY),
                ..Default::default()
            },
        )],
        alignment: TextAlignment::Start,
        direction: Direction::Ltr,
    }
}

/// Insert a notes placeholder paragraph after every `Verse <n>` paragraph.
///
/// The heading quoted in each note is the first paragraph containing
/// "Chapter". A verse already followed by its notes paragraph is left
/// alone, so annotating twice adds nothing.
pub fn add_verse_notes(paragraphs: &[Paragraph]) -> Result<Vec<Paragraph>, AnnotateError> {
    let heading = paragraphs
        .iter()
        .map(|p| p.text())
        .find(|text| text.contains(CHAPTER_KEYWORD))
        .map(|text| text.trim().to_string())
        .ok_or(AnnotateError::MissingChapterHeading)?;

    let mut annotated = Vec::with_capacity(paragraphs.len() * 2);

    for (idx, paragraph) in paragraphs.iter().enumerate() {
        annotated.push(paragraph.clone());

        let text = paragraph.text();
        let Some(caps) = VERSE_NUMBER.captures(text.trim()) else {
            continue;
        };

        let expected = notes_text(&heading, &caps[1]);
        let already_noted = paragraphs
            .get(idx + 1)
            .is_some_and(|next| next.text() == expected);
        if !already_noted {
            annotated.push(notes_paragraph(&heading, &caps[1]));
        }
    }

    Ok(annotated)
}

/// Drop everything before "Chapter" in the second paragraph.
///
/// Scraped headers carry navigation text ahead of the chapter title.
/// Returns whether the paragraph changed.
pub fn trim_chapter_heading(paragraphs: &mut [Paragraph]) -> bool {
    let Some(second) = paragraphs.get_mut(1) else {
        return false;
    };

    let text = second.text();
    match text.find(CHAPTER_KEYWORD) {
        Some(idx) if idx > 0 => second.rewrite_text(text[idx..].to_string()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Vec<Paragraph> {
        vec![
            Paragraph::from_text("בראשית פרק א"),
            Paragraph::from_text("Bereshit Chapter 1"),
            Paragraph::from_text("בראשית ברא"),
            Paragraph::from_text("Verse 1 In the beginning"),
            Paragraph::from_text("והארץ"),
            Paragraph::from_text("Verse 2 Now the earth"),
        ]
    }

    #[test]
    fn test_add_verse_notes() {
        let annotated = add_verse_notes(&doc()).unwrap();
        assert_eq!(annotated.len(), 8);

        let notes = &annotated[4];
        assert_eq!(
            notes.text(),
            "[notes]( Bereshit Chapter 1 Verse 1 )[end_notes]"
        );
        assert!(notes.runs[0].style.italic);
        assert_eq!(notes.runs[0].style.color, Some(Rgb::LIGHT_GREY));
        assert_eq!(notes.alignment, TextAlignment::Start);

        assert_eq!(
            annotated[7].text(),
            "[notes]( Bereshit Chapter 1 Verse 2 )[end_notes]"
        );
    }

    #[test]
    fn test_add_verse_notes_twice_adds_nothing() {
        let once = add_verse_notes(&doc()).unwrap();
        let twice = add_verse_notes(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_verse_notes_requires_heading() {
        let paragraphs = vec![Paragraph::from_text("Verse 1 text")];
        assert_eq!(
            add_verse_notes(&paragraphs),
            Err(AnnotateError::MissingChapterHeading)
        );
    }

    #[test]
    fn test_verse_without_number_gets_no_notes() {
        let paragraphs = vec![
            Paragraph::from_text("Chapter 3"),
            Paragraph::from_text("Verses follow"),
        ];
        assert_eq!(add_verse_notes(&paragraphs).unwrap().len(), 2);
    }

    #[test]
    fn test_trim_chapter_heading() {
        let mut paragraphs = vec![
            Paragraph::from_text("בראשית"),
            Paragraph::from_text("Home > Torah > Bereshit Chapter 1"),
        ];
        assert!(trim_chapter_heading(&mut paragraphs));
        assert_eq!(paragraphs[1].text(), "Chapter 1");
        assert!(!trim_chapter_heading(&mut paragraphs));
    }

    #[test]
    fn test_trim_chapter_heading_needs_two_paragraphs() {
        let mut paragraphs = vec![Paragraph::from_text("x Chapter 1")];
        assert!(!trim_chapter_heading(&mut paragraphs));
        assert_eq!(paragraphs[0].text(), "x Chapter 1");
    }

    #[test]
    fn test_trim_chapter_heading_without_keyword() {
        let mut paragraphs = vec![Paragraph::from_text("a"), Paragraph::from_text("b")];
        assert!(!trim_chapter_heading(&mut paragraphs));
    }
}
