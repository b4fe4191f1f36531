//! Plain python script format
//!
//! Cells without metadata are emitted bare and their boundaries inferred
//! from blank lines; cells that need it get a `# + {json}` start line and
//! a `# -` style end marker. Markdown turns into `# ` comment runs.
//!
//! The reader's boundary scan is also the probing entry point the
//! encoder consults before deciding whether a cell needs explicit
//! markers, so the two sides can never disagree.

use crate::cell::encoders::{is_end_marker, uncomment_lines, Dialect};
use crate::cell::magics::unescape_magic;
use crate::cell::metadata::{is_active, json_options_to_metadata};
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::common::{
    count_blank, document_language, record_skiplines, serialize_cells, split_document,
};
use crate::notebook::{lines_to_source, Cell, CellType, Notebook};
use serde_json::Value;

/// Plain python script with `# + {...}` cell markers
pub struct PyScriptFormat;

impl Format for PyScriptFormat {
    fn name(&self) -> &str {
        "pyscript"
    }

    fn description(&self) -> &str {
        "Python script with comment-based cell markers"
    }

    fn file_extensions(&self) -> &[&str] {
        &["py"]
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
            .insert("main_language".to_string(), Value::from("python"));
        Ok(notebook)
    }

    fn serialize(&self, notebook: &Notebook) -> Result<String, FormatError> {
        let language = document_language(notebook, Dialect::PyScript);
        serialize_cells(&notebook.cells, &language, Dialect::PyScript)
    }
}

/// Number of lines the reader consumes for an implicit (marker-less)
/// cell starting at the first line: everything up to a blank line or a
/// start marker.
pub fn probe_cell_bounds(lines: &[String]) -> usize {
    let mut end = 0;
    while end < lines.len() {
        let line = &lines[end];
        if line.is_empty() {
            break;
        }
        if start_marker_options(line).is_some() {
            break;
        }
        end += 1;
    }
    end
}

fn start_marker_options(line: &str) -> Option<&str> {
    line.strip_prefix("# + ").filter(|rest| rest.starts_with('{'))
}

fn parse_cell(lines: &[String]) -> Result<(Cell, usize), FormatError> {
    if let Some(options) = start_marker_options(&lines[0]) {
        return parse_marked_cell(lines, options);
    }
    let end = probe_cell_bounds(lines);
    let paragraph = &lines[..end];
    if paragraph.iter().all(|line| line.starts_with('#')) {
        let source = uncomment_lines(paragraph, "#");
        return Ok((Cell::markdown(lines_to_source(&source)), end));
    }
    let mut source = paragraph.to_vec();
    unescape_magic(&mut source, "python");
    Ok((Cell::code(lines_to_source(&source)), end))
}

fn parse_marked_cell(lines: &[String], options: &str) -> Result<(Cell, usize), FormatError> {
    let mut metadata = json_options_to_metadata(options)?;
    let endofcell = match metadata.get("endofcell") {
        Some(Value::String(token)) => token.clone(),
        _ => "-".to_string(),
    };
    let close = lines[1..]
        .iter()
        .position(|line| is_end_marker(line, &endofcell))
        .ok_or_else(|| {
            FormatError::ParseError(format!("missing '# {endofcell}' end-of-cell marker"))
        })?;
    let mut body = lines[1..1 + close].to_vec();
    let consumed = close + 2;

    // blank lines kept inside the cell, ahead of the end marker
    let mut padlines = 0;
    while body.last().is_some_and(|line| line.is_empty()) {
        body.pop();
        padlines += 1;
    }
    if padlines > 0 {
        metadata.insert("padlines".to_string(), Value::from(padlines));
    }

    let cell_type = if is_active("ipynb", &metadata) {
        CellType::Code
    } else {
        CellType::Raw
    };
    let mut source = body;
    if is_active("py", &metadata) {
        let language = metadata
            .get("language")
            .and_then(Value::as_str)
            .unwrap_or("python")
            .to_string();
        unescape_magic(&mut source, &language);
    } else {
        source = uncomment_lines(&source, "#");
    }
    Ok((
        Cell::new(cell_type, lines_to_source(&source)).with_metadata(metadata),
        consumed,
    ))
}
