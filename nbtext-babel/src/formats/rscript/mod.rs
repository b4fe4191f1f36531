//! R script format
//!
//! Markdown lives in `#'` comment runs (the roxygen/spin convention),
//! tagged code cells get a `#+ key=value` directive line, and untagged
//! cells are emitted bare so the file reads as an ordinary R script.
//! There is no end-of-cell marker machinery; boundaries come from blank
//! lines and directive/commentary prefixes.

use crate::cell::encoders::{uncomment_lines, Dialect};
use crate::cell::metadata::{is_active, rmd_options_to_metadata};
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::common::{
    count_blank, document_language, record_skiplines, serialize_cells, split_document,
};
use crate::notebook::{lines_to_source, Cell, CellType, Notebook};
use serde_json::Value;

/// R script with `#+` directives and `#'` commentary
pub struct RScriptFormat;

impl Format for RScriptFormat {
    fn name(&self) -> &str {
        "rscript"
    }

    fn description(&self) -> &str {
        "R script with #+ directives and #' commentary"
    }

    fn file_extensions(&self) -> &[&str] {
        &["R", "r"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Notebook, FormatError> {
        let lines = split_document(source);
        let mut cells = Vec::new();
        let mut pos = count_blank(&lines, 0);
        while pos < lines.len() {
            let (mut cell, consumed) = parse_cell(&lines[pos..])?;
            pos += consumed;
            pos += record_skiplines(&mut cell, &lines, pos);
            cells.push(cell);
        }
        let mut notebook = Notebook::new(cells);
        notebook
            .metadata
            .insert("main_language".to_string(), Value::from("R"));
        Ok(notebook)
    }

    fn serialize(&self, notebook: &Notebook) -> Result<String, FormatError> {
        let language = document_language(notebook, Dialect::RScript);
        serialize_cells(&notebook.cells, &language, Dialect::RScript)
    }
}

fn is_markdown_line(line: &str) -> bool {
    line == "#'" || line.starts_with("#' ")
}

fn directive_options(line: &str) -> Option<&str> {
    match line.strip_prefix("#+ ") {
        Some(options) => Some(options),
        None if line == "#+" => Some(""),
        None => None,
    }
}

/// Lines belonging to the code body that starts at `from`.
fn code_extent(lines: &[String], from: usize) -> usize {
    let mut end = from;
    while end < lines.len() {
        let line = &lines[end];
        if line.is_empty() || is_markdown_line(line) || directive_options(line).is_some() {
            break;
        }
        end += 1;
    }
    end
}

fn parse_cell(lines: &[String]) -> Result<(Cell, usize), FormatError> {
    let first = &lines[0];
    if is_markdown_line(first) {
        let end = lines
            .iter()
            .position(|line| !is_markdown_line(line))
            .unwrap_or(lines.len());
        let source = uncomment_lines(&lines[..end], "#'");
        return Ok((Cell::markdown(lines_to_source(&source)), end));
    }
    if let Some(options) = directive_options(first) {
        let (label, mut metadata) = rmd_options_to_metadata(options)?;
        // a bare leading token is a knitr-style chunk label
        if let Some(label) = label {
            metadata.insert("name".to_string(), Value::String(label));
        }
        let end = code_extent(lines, 1);
        let mut source = lines[1..end].to_vec();
        let cell_type = if is_active("ipynb", &metadata) {
            CellType::Code
        } else {
            CellType::Raw
        };
        if !is_active("R", &metadata) {
            source = uncomment_lines(&source, "#");
        }
        return Ok((
            Cell::new(cell_type, lines_to_source(&source)).with_metadata(metadata),
            end,
        ));
    }
    let end = code_extent(lines, 0);
    Ok((Cell::code(lines_to_source(&lines[..end])), end))
}
