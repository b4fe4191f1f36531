//! Helpers shared by the document-level readers and writers
//!
//! A document is the concatenation of per-cell texts separated by
//! `skiplines` blank lines (one by default). The writer lives here; each
//! reader keeps its own cell-boundary scan but shares the blank-line
//! bookkeeping.

use crate::cell::{CellExporter, Dialect};
use crate::error::FormatError;
use crate::notebook::{Cell, Notebook};
use serde_json::Value;

/// Split a document into lines, dropping the final newline.
pub(crate) fn split_document(source: &str) -> Vec<String> {
    let trimmed = source.strip_suffix('\n').unwrap_or(source);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}

/// The language assumed for cells without their own directive.
pub(crate) fn document_language(notebook: &Notebook, dialect: Dialect) -> String {
    notebook
        .main_language()
        .unwrap_or_else(|| dialect.native_language().unwrap_or("python"))
        .to_string()
}

/// Serialize cells to one document, honoring each cell's `skiplines`.
pub(crate) fn serialize_cells(
    cells: &[Cell],
    default_language: &str,
    dialect: Dialect,
) -> Result<String, FormatError> {
    let mut lines: Vec<String> = Vec::new();
    for (index, cell) in cells.iter().enumerate() {
        let exporter = CellExporter::new(cell, default_language, dialect);
        lines.extend(exporter.cell_to_text()?);
        if index + 1 < cells.len() {
            let blanks = exporter.skiplines.max(0) as usize;
            lines.extend(std::iter::repeat_with(String::new).take(blanks));
        }
    }
    if lines.is_empty() {
        return Ok(String::new());
    }
    let mut document = lines.join("\n");
    document.push('\n');
    Ok(document)
}

/// Number of consecutive blank lines at `from`.
pub(crate) fn count_blank(lines: &[String], from: usize) -> usize {
    lines[from.min(lines.len())..]
        .iter()
        .take_while(|line| line.is_empty())
        .count()
}

/// Consume the blank separator after a cell, recording a non-default
/// `skiplines` count on the cell. Returns the number of lines consumed.
pub(crate) fn record_skiplines(cell: &mut Cell, lines: &[String], pos: usize) -> usize {
    let blanks = count_blank(lines, pos);
    let at_end = pos + blanks >= lines.len();
    if !at_end && blanks != 1 {
        cell.metadata
            .insert("skiplines".to_string(), Value::from(blanks as i64));
    }
    blanks
}
