//! Verse Weave Library
//!
//! Weaves a right-to-left source text and its left-to-right translation into
//! one bilingual document, paragraph by paragraph, and normalizes the
//! punctuation and direction-control characters that scraped verse text
//! carries.
//!
//! # Example
//!
//! ```no_run
//! use verse_weave::prelude::*;
//! use std::path::Path;
//!
//! let params = WeaveParams::default();
//!
//! // Load both streams
//! let source = load_paragraphs(Path::new("heb.json"), None).unwrap();
//! let target = load_paragraphs(Path::new("eng.txt"), None).unwrap();
//!
//! // Weave them
//! let result = weave(&source, &target, &params);
//!
//! println!("Wove {} paragraphs into {}", result.paragraphs.len(), result.filename);
//! write_json_file(&result, Path::new(&result.filename).with_extension("json").as_path()).unwrap();
//! ```
//!
//! # Normalization Example
//!
//! ```no_run
//! use verse_weave::prelude::*;
//!
//! // Move an embedded verse marker to the front of the line
//! let line = "בראשית ברא אלהים \u{202A}(א)\u{202A}:";
//! println!("{}", reposition(line));
//!
//! // Collapse doubled separators in a translation line
//! assert_eq!(collapse_double_separator("Genesis 1::1"), "Genesis 1:1");
//!
//! // Build a file name
//! assert_eq!(sanitize("Bereshit_Chapter_1_Verses_1"), "Bereshit Chapter_1 Verses_1");
//! ```

pub mod annotate;
pub mod filename;
pub mod marker;
pub mod merge;
pub mod models;
pub mod output;
pub mod punctuation;
pub mod script;
pub mod source;
pub mod weave;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::annotate::{add_verse_notes, notes_text, trim_chapter_heading, AnnotateError};
    pub use crate::filename::{output_filename, sanitize};
    pub use crate::marker::{canonical_line, extract_marker, reposition, reposition_paragraph, VerseMarker};
    pub use crate::merge::merge_verse_paragraphs;
    pub use crate::models::{
        Direction, DocumentPair, FilenamePolicy, Paragraph, Rgb, Run, RunStyle, ScriptStyle,
        StylePolicy, TextAlignment, WeaveParams, WeaveResult, WeaveSummary, MARKER_DELIMITER,
        RTL_MARK, SEPARATOR,
    };
    pub use crate::output::{
        format_paragraph, generate_html, output_path, print_paragraphs, print_summary,
        read_json_file, write_html_file, write_json, write_json_file, OutputError,
    };
    pub use crate::punctuation::{
        collapse_double_separator, collapse_paragraph, ensure_single_trailing_separator,
        normalize_document, NormalizeReport,
    };
    pub use crate::script::{is_target_script, ScriptRange};
    pub use crate::source::{
        load_json_paragraphs, load_paragraphs, load_text_paragraphs, load_xlsx_paragraphs,
        paragraphs_from_json, paragraphs_from_text, SourceError,
    };
    pub use crate::weave::{interleave, restyle, weave, weave_batch, weave_pair, Stream};
}

// Re-export commonly used types at the crate root
pub use models::{Paragraph, Run, WeaveParams, WeaveResult};
pub use weave::weave;
