//! Notebook container and cell model
//!
//! A notebook is an ordered list of cells plus notebook-level metadata.
//! Cell sources are stored as a single string with embedded line breaks;
//! [`Cell::source_lines`] and [`lines_to_source`] convert between that
//! representation and a line vector without losing a trailing newline.

use serde_json::{Map, Value};

/// Ordered metadata mapping attached to notebooks and cells.
pub type Metadata = Map<String, Value>;

/// The three kinds of notebook cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

impl CellType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::Code => "code",
            CellType::Markdown => "markdown",
            CellType::Raw => "raw",
        }
    }

    pub fn from_name(name: &str) -> Option<CellType> {
        match name {
            "code" => Some(CellType::Code),
            "markdown" => Some(CellType::Markdown),
            "raw" => Some(CellType::Raw),
            _ => None,
        }
    }
}

/// A single notebook cell: typed content plus metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub cell_type: CellType,
    pub source: String,
    pub metadata: Metadata,
}

impl Cell {
    pub fn new(cell_type: CellType, source: impl Into<String>) -> Self {
        Cell {
            cell_type,
            source: source.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn code(source: impl Into<String>) -> Self {
        Cell::new(CellType::Code, source)
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Cell::new(CellType::Markdown, source)
    }

    pub fn raw(source: impl Into<String>) -> Self {
        Cell::new(CellType::Raw, source)
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Split the source into lines.
    ///
    /// Empty source yields one empty line; a source ending in a newline
    /// yields its lines plus one trailing empty line. [`lines_to_source`]
    /// is the exact inverse.
    pub fn source_lines(&self) -> Vec<String> {
        source_to_lines(&self.source)
    }
}

/// Split a source string into lines (see [`Cell::source_lines`]).
pub fn source_to_lines(source: &str) -> Vec<String> {
    source.split('\n').map(str::to_string).collect()
}

/// Join lines back into a source string. Inverse of [`source_to_lines`].
pub fn lines_to_source(lines: &[String]) -> String {
    lines.join("\n")
}

/// A notebook document: metadata plus an ordered cell list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Notebook {
    pub metadata: Metadata,
    pub cells: Vec<Cell>,
}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Notebook {
            metadata: Metadata::new(),
            cells,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The notebook's main language, when recorded in its metadata.
    ///
    /// Looks at `main_language` first, then the nbformat locations
    /// (`language_info.name`, `kernelspec.language`).
    pub fn main_language(&self) -> Option<&str> {
        if let Some(lang) = self.metadata.get("main_language").and_then(Value::as_str) {
            return Some(lang);
        }
        if let Some(lang) = self
            .metadata
            .get("language_info")
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
        {
            return Some(lang);
        }
        self.metadata
            .get("kernelspec")
            .and_then(|v| v.get("language"))
            .and_then(Value::as_str)
    }
}
