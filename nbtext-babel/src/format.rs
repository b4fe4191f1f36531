//! Format trait definition
//!
//! Every text representation a notebook can take is one implementation
//! of the Format trait. The trait provides a uniform interface for
//! parsing and serializing; formats can support either direction or both.

use crate::error::FormatError;
use crate::notebook::Notebook;

/// Trait for notebook text formats
///
/// Implementors provide bidirectional conversion between a string
/// representation and the [`Notebook`] model.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "ipynb", "rmd", "pyscript")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading
    /// dot. Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Notebook)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Notebook → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Notebook
    fn parse(&self, _source: &str) -> Result<Notebook, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Notebook into source text
    fn serialize(&self, _notebook: &Notebook) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}

impl std::fmt::Debug for dyn Format + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Format").field("name", &self.name()).finish()
    }
}
