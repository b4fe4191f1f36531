//! Per-cell text export engine
//!
//! [`CellExporter`] turns one notebook cell into the line sequence of a
//! target dialect. It owns copies of the cell's source and metadata, so
//! the caller's cell is never mutated; fidelity keys (`endofcell`,
//! `active`, `language`) appear only in the emitted text and are restored
//! by the matching reader.

use crate::cell::encoders::{comment_lines, Dialect, EncodeContext};
use crate::cell::languages::{cell_language, same_language};
use crate::cell::magics::escape_magic;
use crate::cell::metadata::{filter_metadata, is_active};
use crate::error::FormatError;
use crate::notebook::{Cell, CellType, Metadata};
use serde_json::Value;

pub struct CellExporter {
    dialect: Dialect,
    cell_type: CellType,
    source: Vec<String>,
    metadata: Metadata,
    language: String,
    /// Blank lines inserted before a closing end-of-cell marker.
    padlines: usize,
    /// Blank lines between this cell and the next one.
    pub skiplines: i64,
}

impl CellExporter {
    pub fn new(cell: &Cell, default_language: &str, dialect: Dialect) -> Self {
        let mut source = cell.source_lines();
        let mut metadata = filter_metadata(&cell.metadata);

        let directive = cell_language(&source);
        let language = directive
            .as_ref()
            .map(|d| d.language.clone())
            .unwrap_or_else(|| default_language.to_string());

        // Fenced chunks carry the language in their head, so the directive
        // line comes out of the source and its arguments move to metadata.
        // Script dialects keep the line; the commented block then
        // round-trips byte for byte.
        if dialect == Dialect::Rmd {
            if let Some(directive) = directive {
                source.remove(0);
                if let Some(args) = directive.magic_args {
                    metadata
                        .entry("magic_args".to_string())
                        .or_insert_with(|| Value::String(args));
                }
            }
        }

        let padlines = cell
            .metadata
            .get("padlines")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;
        let mut skiplines = cell
            .metadata
            .get("skiplines")
            .and_then(Value::as_i64)
            .unwrap_or(1);
        // legacy single-step keys, still honored on input
        if cell.metadata.contains_key("skipline") {
            skiplines += 1;
        }
        if cell.metadata.contains_key("noskipline") {
            skiplines -= 1;
        }

        // a raw cell with no activation policy is inert everywhere
        if cell.cell_type == CellType::Raw && !metadata.contains_key("active") {
            metadata.insert("active".to_string(), Value::String(String::new()));
        }

        CellExporter {
            dialect,
            cell_type: cell.cell_type,
            source,
            metadata,
            language,
            padlines,
            skiplines,
        }
    }

    /// Is this cell rendered as (possibly inert) code?
    pub fn is_code(&self) -> bool {
        match self.cell_type {
            CellType::Code => true,
            CellType::Raw => self.metadata.contains_key("active"),
            CellType::Markdown => false,
        }
    }

    /// The text representation of the cell, as lines.
    pub fn cell_to_text(&self) -> Result<Vec<String>, FormatError> {
        if self.is_code() {
            self.code_to_text()
        } else {
            Ok(self.markdown_escape(&self.source))
        }
    }

    /// Wrap markdown lines in the dialect's comment prefix.
    ///
    /// Exactly invertible by stripping the prefix again. Lines that
    /// already begin with the prefix by coincidence are not detected;
    /// only the plain-script marker allocation guards against that class
    /// of collision.
    pub fn markdown_escape(&self, source: &[String]) -> Vec<String> {
        match self.dialect.markdown_prefix() {
            None => source.to_vec(),
            Some(prefix) => comment_lines(source, prefix),
        }
    }

    fn code_to_text(&self) -> Result<Vec<String>, FormatError> {
        let mut metadata = self.metadata.clone();
        let mut active = is_active(self.dialect.tag(), &metadata);

        // A cell in a foreign language cannot execute in a script dialect.
        // Demote it to inert text and record enough for a reader to
        // restore both the language and the execution intent.
        if let Some(native) = self.dialect.native_language() {
            if active && !same_language(&self.language, native) {
                active = false;
                metadata.insert("active".to_string(), Value::String("ipynb".to_string()));
                metadata.insert(
                    "language".to_string(),
                    Value::String(self.language.clone()),
                );
            }
        }

        let mut source = self.source.clone();
        if active {
            escape_magic(&mut source, &self.language);
        }

        let ctx = EncodeContext {
            language: &self.language,
            padlines: self.padlines,
            original: &self.source,
        };
        let encoder = self.dialect.encoder();
        if active {
            encoder.encode_active(source, &mut metadata, &ctx)
        } else {
            encoder.encode_inactive(source, &mut metadata, &ctx)
        }
    }
}
