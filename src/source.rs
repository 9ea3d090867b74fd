//! Paragraph sources: JSON, plain text, and Excel workbooks.
//!
//! The weaving core never touches the filesystem; these adapters turn the
//! files the CLI is pointed at into paragraph lists.

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;
use thiserror::Error;

use crate::models::Paragraph;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Excel XLSX error: {0}")]
    ExcelXlsx(#[from] calamine::XlsxError),
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),
}

/// Parse a JSON array of paragraphs.
pub fn paragraphs_from_json(json: &str) -> Result<Vec<Paragraph>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// One paragraph per non-empty line.
pub fn paragraphs_from_text(text: &str) -> Vec<Paragraph> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(Paragraph::from_text)
        .collect()
}

/// Load paragraphs from a JSON file.
pub fn load_json_paragraphs(path: &Path) -> Result<Vec<Paragraph>, SourceError> {
    let json = std::fs::read_to_string(path)?;
    paragraphs_from_json(&json)
}

/// Load paragraphs from a plain text file.
pub fn load_text_paragraphs(path: &Path) -> Result<Vec<Paragraph>, SourceError> {
    let text = std::fs::read_to_string(path)?;
    Ok(paragraphs_from_text(&text))
}

/// Load one paragraph per row from an Excel workbook.
///
/// Uses `sheet` if given, the first sheet otherwise. The header row is
/// skipped; the non-empty cells of each row are joined with a space, so a
/// reference in column A and verse text in column B read as "A B".
pub fn load_xlsx_paragraphs(path: &Path, sheet: Option<&str>) -> Result<Vec<Paragraph>, SourceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SourceError::SheetNotFound("(first sheet)".to_string()))?,
    };

    if !workbook.sheet_names().contains(&sheet_name) {
        return Err(SourceError::SheetNotFound(sheet_name));
    }

    let range = workbook.worksheet_range(&sheet_name)?;
    let paragraphs = range
        .rows()
        .skip(1)
        .filter_map(|row| row_text(row).map(Paragraph::from_text))
        .collect();

    Ok(paragraphs)
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn row_text(row: &[Data]) -> Option<String> {
    let cells: Vec<String> = row.iter().filter_map(cell_text).collect();
    (!cells.is_empty()).then(|| cells.join(" "))
}

/// Load paragraphs from `path`, choosing the reader by file extension.
pub fn load_paragraphs(path: &Path, sheet: Option<&str>) -> Result<Vec<Paragraph>, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => load_json_paragraphs(path),
        "txt" => load_text_paragraphs(path),
        "xlsx" => load_xlsx_paragraphs(path, sheet),
        _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
    }
}
