//! Fenced (R-Markdown-like) format
//!
//! Code cells become ```` ```{language, options} ```` chunks, markdown
//! passes through untouched, and a leading `---` front-matter block maps
//! to a raw cell. Chunks in a language other than the document's main
//! language carry the language in the chunk head; on read the language
//! comes back as a `%%language` directive line so the cell keeps its
//! identity inside a notebook.

use crate::cell::encoders::Dialect;
use crate::cell::languages::{canonical_language, same_language, LanguageDirective};
use crate::cell::magics::unescape_magic;
use crate::cell::metadata::{is_active, rmd_options_to_metadata};
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::common::{
    count_blank, document_language, record_skiplines, serialize_cells, split_document,
};
use crate::notebook::{lines_to_source, Cell, CellType, Metadata, Notebook};
use serde_json::Value;

/// Fenced chunk format (R-Markdown-like)
pub struct RmdFormat;

impl Format for RmdFormat {
    fn name(&self) -> &str {
        "rmd"
    }

    fn description(&self) -> &str {
        "Markdown with fenced, optioned code chunks"
    }

    fn file_extensions(&self) -> &[&str] {
        &["Rmd", "rmd"]
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
        let mut pos = 0;
        let mut main_language = "python".to_string();

        if let Some((front_matter, consumed)) = parse_front_matter(&lines) {
            if let Some(language) = scan_main_language(&lines[..consumed]) {
                main_language = language;
            }
            let mut cell = front_matter;
            pos = consumed;
            pos += record_skiplines(&mut cell, &lines, pos);
            cells.push(cell);
        }

        pos += count_blank(&lines, pos);
        while pos < lines.len() {
            let (mut cell, consumed) = parse_cell(&lines[pos..], &main_language)?;
            pos += consumed;
            pos += record_skiplines(&mut cell, &lines, pos);
            cells.push(cell);
        }

        let mut metadata = Metadata::new();
        metadata.insert("main_language".to_string(), Value::from(main_language));
        Ok(Notebook::new(cells).with_metadata(metadata))
    }

    fn serialize(&self, notebook: &Notebook) -> Result<String, FormatError> {
        let language = document_language(notebook, Dialect::Rmd);
        let mut cells = notebook.cells.as_slice();
        let mut prefix = String::new();
        // front matter is document structure, not an encoded cell
        if let Some(first) = cells.first() {
            if is_front_matter(first) {
                cells = &cells[1..];
                let header = first.source.clone();
                if cells.is_empty() {
                    return Ok(header + "\n");
                }
                let blanks = first
                    .metadata
                    .get("skiplines")
                    .and_then(Value::as_u64)
                    .unwrap_or(1) as usize;
                prefix = format!("{header}\n{}", "\n".repeat(blanks));
            }
        }
        let body = serialize_cells(cells, &language, Dialect::Rmd)?;
        Ok(format!("{prefix}{body}"))
    }
}

fn is_front_matter(cell: &Cell) -> bool {
    if cell.cell_type != CellType::Raw {
        return false;
    }
    let lines = cell.source_lines();
    lines.len() >= 2 && lines[0] == "---" && lines[lines.len() - 1] == "---"
}

fn parse_front_matter(lines: &[String]) -> Option<(Cell, usize)> {
    if lines.first()? != "---" {
        return None;
    }
    let close = lines[1..].iter().position(|line| line == "---")?;
    let consumed = close + 2;
    Some((Cell::raw(lines_to_source(&lines[..consumed])), consumed))
}

fn scan_main_language(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        line.trim()
            .strip_prefix("main_language:")
            .map(|value| value.trim().to_string())
    })
}

fn chunk_options(line: &str) -> Option<&str> {
    line.strip_prefix("```{")
        .and_then(|rest| rest.trim_end().strip_suffix('}'))
}

fn parse_cell(lines: &[String], main_language: &str) -> Result<(Cell, usize), FormatError> {
    if let Some(options) = chunk_options(&lines[0]) {
        return parse_chunk(lines, options, main_language);
    }

    // markdown: everything up to the next chunk head, with plain fences
    // tracked so their interiors never terminate the cell
    let mut end = 0;
    let mut in_fence = false;
    while end < lines.len() {
        let line = &lines[end];
        if !in_fence && chunk_options(line).is_some() {
            break;
        }
        if line.starts_with("```") && chunk_options(line).is_none() {
            in_fence = !in_fence;
        }
        end += 1;
    }
    // trailing blanks are the separator, not cell content
    let mut content_end = end;
    while content_end > 0 && lines[content_end - 1].is_empty() {
        content_end -= 1;
    }
    Ok((
        Cell::markdown(lines_to_source(&lines[..content_end])),
        content_end,
    ))
}

fn parse_chunk(
    lines: &[String],
    options: &str,
    main_language: &str,
) -> Result<(Cell, usize), FormatError> {
    let (language, mut metadata) = rmd_options_to_metadata(options)?;
    let close = lines[1..]
        .iter()
        .position(|line| line.trim_end() == "```")
        .ok_or_else(|| FormatError::ParseError("unterminated code chunk".to_string()))?;
    let mut body = lines[1..1 + close].to_vec();
    let consumed = close + 2;

    let language = language
        .map(|l| canonical_language(&l).to_string())
        .unwrap_or_else(|| main_language.to_string());
    if !same_language(&language, main_language) {
        let magic_args = match metadata.remove("magic_args") {
            Some(Value::String(args)) => Some(args),
            _ => None,
        };
        let directive = LanguageDirective {
            language: language.clone(),
            magic_args,
        };
        body.insert(0, directive.to_line());
    }

    let cell_type = if is_active("ipynb", &metadata) {
        CellType::Code
    } else {
        CellType::Raw
    };
    if is_active("Rmd", &metadata) {
        unescape_magic(&mut body, &language);
    }
    Ok((
        Cell::new(cell_type, lines_to_source(&body)).with_metadata(metadata),
        consumed,
    ))
}
