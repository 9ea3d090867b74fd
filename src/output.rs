//! Output formatting for woven documents (JSON, HTML preview, console).

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Direction, FilenamePolicy, Paragraph, Run, TextAlignment, WeaveResult};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a woven document as JSON.
pub fn write_json<W: Write>(result: &WeaveResult, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(result)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a woven document as JSON to a file, replacing any existing file.
pub fn write_json_file(result: &WeaveResult, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(result, &mut file)
}

/// Path for a woven document in `dir`, with `extension` as its extension.
///
/// The policy's extension, if any, is swapped for `extension`. Without one,
/// `extension` is appended so dots inside the name survive.
pub fn output_path(dir: &Path, filename: &str, policy: &FilenamePolicy, extension: &str) -> PathBuf {
    let path = dir.join(filename);
    if policy.extension.trim_start_matches('.').is_empty() {
        let mut name = path.into_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    } else {
        path.with_extension(extension)
    }
}

/// Read a woven document previously written with `write_json`.
pub fn read_json_file(path: &Path) -> Result<WeaveResult, OutputError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Print a summary of one weave to stdout.
pub fn print_summary(result: &WeaveResult) {
    let summary = &result.summary;
    println!("\n=== Weave Summary ===");
    println!("Version: {}", result.version);
    println!("Output name: {}", result.filename);
    println!();
    println!("Inputs:");
    println!("  Source paragraphs: {}", summary.source_paragraphs);
    println!("  Target paragraphs: {}", summary.target_paragraphs);
    println!();
    println!("Results:");
    println!("  Paragraphs emitted: {}", summary.emitted);
    println!("  Unmatched source paragraphs: {}", summary.unmatched_source);
    println!("  Dropped target paragraphs: {}", summary.dropped_target);
    println!("  Markers repositioned: {}", summary.markers_repositioned);
    println!("  Separator runs collapsed: {}", summary.separators_collapsed);
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Ltr => "ltr",
        Direction::Rtl => "rtl",
    }
}

fn alignment_label(alignment: TextAlignment) -> &'static str {
    match alignment {
        TextAlignment::Start => "start",
        TextAlignment::Center => "center",
        TextAlignment::End => "end",
    }
}

/// Format a paragraph as a one-line console entry.
pub fn format_paragraph(index: usize, paragraph: &Paragraph) -> String {
    format!(
        "[{:>4}] {} {:<6} {}",
        index,
        direction_label(paragraph.direction),
        alignment_label(paragraph.alignment),
        paragraph.text()
    )
}

/// Print paragraphs to stdout, optionally limited.
pub fn print_paragraphs(paragraphs: &[Paragraph], limit: Option<usize>) {
    let limit = limit.unwrap_or(paragraphs.len());
    for (i, paragraph) in paragraphs.iter().take(limit).enumerate() {
        println!("{}", format_paragraph(i, paragraph));
    }
    if paragraphs.len() > limit {
        println!("... and {} more paragraphs", paragraphs.len() - limit);
    }
}

// ============================================================================
// HTML preview
// ============================================================================

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn run_css(run: &Run) -> String {
    let style = &run.style;
    let mut css = Vec::new();

    if let Some(family) = &style.font_family {
        css.push(format!("font-family: '{}'", escape_html(family)));
    }
    if let Some(size) = style.font_size {
        css.push(format!("font-size: {}pt", size));
    }
    if style.bold {
        css.push("font-weight: bold".to_string());
    }
    if style.italic {
        css.push("font-style: italic".to_string());
    }
    if style.underline {
        css.push("text-decoration: underline".to_string());
    }
    if let Some(color) = style.color {
        css.push(format!("color: {}", color.to_hex()));
    }

    css.join("; ")
}

fn paragraph_html(paragraph: &Paragraph) -> String {
    let spans: String = paragraph
        .runs
        .iter()
        .map(|run| {
            let css = run_css(run);
            if css.is_empty() {
                format!("<span>{}</span>", escape_html(&run.text))
            } else {
                format!("<span style=\"{}\">{}</span>", css, escape_html(&run.text))
            }
        })
        .collect();

    format!(
        "<p dir=\"{}\" style=\"text-align: {}\">{}</p>",
        direction_label(paragraph.direction),
        alignment_label(paragraph.alignment),
        spans
    )
}

/// Render a self-contained HTML preview of a woven document.
pub fn generate_html(result: &WeaveResult) -> String {
    let body: Vec<String> = result.paragraphs.iter().map(paragraph_html).collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="he" dir="ltr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ margin: 0.5in; line-height: 1.6; }}
        p {{ margin: 0.4em 0; }}
    </style>
</head>
<body>
{body}
</body>
</html>"##,
        title = escape_html(&result.filename),
        body = body.join("\n"),
    )
}

/// Write the HTML preview to a file.
pub fn write_html_file(result: &WeaveResult, path: &Path) -> Result<(), OutputError> {
    std::fs::write(path, generate_html(result))?;
    Ok(())
}
