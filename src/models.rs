//! Data structures for the verse weaving pipeline.

use serde::{Deserialize, Serialize};

/// Punctuation that separates a verse reference from its body text.
pub const SEPARATOR: char = ':';

/// Direction-control character wrapping an embedded verse marker in
/// scraped source-script text (LEFT-TO-RIGHT EMBEDDING).
pub const MARKER_DELIMITER: char = '\u{202A}';

/// Direction-control character used in the canonical repositioned form
/// (RIGHT-TO-LEFT MARK).
pub const RTL_MARK: char = '\u{200F}';

/// Paragraph alignment, relative to the paragraph's writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Start,
    Center,
    End,
}

/// Paragraph writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Run colour as 8-bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const LIGHT_GREY: Rgb = Rgb(211, 211, 211);

    /// CSS-style hex form, e.g. `#d3d3d3`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Character formatting shared by every character of a run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_family: Option<String>,
    pub font_size: Option<f32>, // points
    pub color: Option<Rgb>,
}

/// A contiguous span of text with uniform formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One paragraph of a document: ordered runs plus paragraph attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: TextAlignment,
    pub direction: Direction,
}

impl Paragraph {
    /// Paragraph holding a single unstyled run
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
            ..Default::default()
        }
    }

    /// Visible text: the concatenation of all run texts
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Style of the first run, or the default style for an empty paragraph
    pub fn leading_style(&self) -> RunStyle {
        self.runs
            .first()
            .map(|r| r.style.clone())
            .unwrap_or_default()
    }

    /// Replace the paragraph text with `text` as a single run carrying the
    /// first run's style. Leaves the paragraph untouched when the text is
    /// already equal. Returns whether anything changed.
    pub fn rewrite_text(&mut self, text: String) -> bool {
        if self.text() == text {
            return false;
        }
        let style = self.leading_style();
        self.runs = vec![Run::styled(text, style)];
        true
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Apply a stream's alignment, direction and font. Bold, italic,
    /// underline and colour of each run are kept.
    pub fn apply_style(&mut self, style: &ScriptStyle) {
        self.alignment = style.alignment;
        self.direction = style.direction;
        for run in &mut self.runs {
            run.style.font_family = Some(style.font_family.clone());
            run.style.font_size = Some(style.font_size);
        }
    }
}

/// Presentation defaults applied to one of the two woven streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStyle {
    pub font_family: String,
    pub font_size: f32,
    pub alignment: TextAlignment,
    pub direction: Direction,
}

/// Presentation policy for both streams of a woven document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePolicy {
    pub source: ScriptStyle, // right-to-left stream
    pub target: ScriptStyle, // left-to-right stream
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self {
            source: ScriptStyle {
                font_family: "Frank Ruehl".to_string(),
                font_size: 16.0,
                alignment: TextAlignment::Center,
                direction: Direction::Rtl,
            },
            target: ScriptStyle {
                font_family: "Times New Roman".to_string(),
                font_size: 12.0,
                alignment: TextAlignment::Start,
                direction: Direction::Ltr,
            },
        }
    }
}

/// How the output file name is composed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenamePolicy {
    pub prefix: String,
    pub fallback: String,
    pub extension: String,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self {
            prefix: "combined".to_string(),
            fallback: "combined".to_string(),
            extension: "docx".to_string(),
        }
    }
}

/// Weaving parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaveParams {
    pub style: StylePolicy,
    pub filename: FilenamePolicy,
    pub reposition_markers: bool,  // Move embedded verse markers to the line start
    pub collapse_separators: bool, // Collapse "::" runs in target-script lines
}

impl Default for WeaveParams {
    fn default() -> Self {
        Self {
            style: StylePolicy::default(),
            filename: FilenamePolicy::default(),
            reposition_markers: true,
            collapse_separators: true,
        }
    }
}

/// Two independently sourced streams to be woven into one document
#[derive(Debug, Clone, Default)]
pub struct DocumentPair {
    pub prefix: Option<String>, // Overrides the filename prefix for this pair
    pub source: Vec<Paragraph>,
    pub target: Vec<Paragraph>,
}

/// Counters describing one weave
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaveSummary {
    pub source_paragraphs: usize,
    pub target_paragraphs: usize,
    pub emitted: usize,
    pub unmatched_source: usize, // Source paragraphs emitted without a partner
    pub dropped_target: usize,   // Target paragraphs past the end of the source stream
    pub markers_repositioned: usize,
    pub separators_collapsed: usize,
}

/// Woven document handed to a sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaveResult {
    pub version: String,
    pub filename: String,
    pub summary: WeaveSummary,
    pub paragraphs: Vec<Paragraph>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let para = Paragraph {
            runs: vec![Run::new("Verse 1 "), Run::new("In the "), Run::new("beginning")],
            ..Default::default()
        };
        assert_eq!(para.text(), "Verse 1 In the beginning");
    }

    #[test]
    fn test_rewrite_text_keeps_first_run_style() {
        let bold = RunStyle {
            bold: true,
            font_family: Some("David".to_string()),
            ..Default::default()
        };
        let mut para = Paragraph {
            runs: vec![Run::styled("a::", bold.clone()), Run::new("b")],
            alignment: TextAlignment::End,
            direction: Direction::Rtl,
        };

        assert!(para.rewrite_text("a:b".to_string()));
        assert_eq!(para.runs.len(), 1);
        assert_eq!(para.runs[0].style, bold);
        assert_eq!(para.alignment, TextAlignment::End);
        assert_eq!(para.direction, Direction::Rtl);
    }

    #[test]
    fn test_rewrite_text_unchanged_keeps_runs() {
        let mut para = Paragraph {
            runs: vec![Run::new("a"), Run::new("b")],
            ..Default::default()
        };
        assert!(!para.rewrite_text("ab".to_string()));
        assert_eq!(para.runs.len(), 2);
    }

    #[test]
    fn test_paragraph_json_defaults() {
        let para: Paragraph = serde_json::from_str(r#"{"runs":[{"text":"x"}]}"#).unwrap();
        assert_eq!(para.alignment, TextAlignment::Start);
        assert_eq!(para.direction, Direction::Ltr);
        assert!(!para.runs[0].style.bold);
    }

    #[test]
    fn test_weave_params_defaults() {
        let params = WeaveParams::default();
        assert_eq!(params.style.source.font_family, "Frank Ruehl");
        assert_eq!(params.style.source.direction, Direction::Rtl);
        assert_eq!(params.style.target.alignment, TextAlignment::Start);
        assert_eq!(params.filename.extension, "docx");
        assert!(params.reposition_markers);
        assert!(params.collapse_separators);
    }

    #[test]
    fn test_apply_style_keeps_run_formatting() {
        let policy = StylePolicy::default();
        let mut para = Paragraph {
            runs: vec![Run::styled(
                "בראשית",
                RunStyle {
                    underline: true,
                    ..Default::default()
                },
            )],
            ..Default::default()
        };

        para.apply_style(&policy.source);
        assert_eq!(para.alignment, TextAlignment::Center);
        assert_eq!(para.direction, Direction::Rtl);
        assert_eq!(para.runs[0].style.font_family.as_deref(), Some("Frank Ruehl"));
        assert_eq!(para.runs[0].style.font_size, Some(16.0));
        assert!(para.runs[0].style.underline);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::LIGHT_GREY.to_hex(), "#d3d3d3");
    }
}
