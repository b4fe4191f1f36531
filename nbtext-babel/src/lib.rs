//! Round-trip conversion between notebook cells and plain-text formats
//!
//!     This crate converts between the notebook model (typed cells with
//!     metadata) and several text representations: the notebook JSON
//!     container, fenced R-Markdown-like documents, R scripts and plain
//!     python scripts.
//!
//!     TLDR: for format authors:
//!         - All formats implement the Format trait (format.rs) and are
//!           discovered through the FormatRegistry (registry.rs).
//!         - The per-cell encoding engine lives in cell/; formats should
//!           not reimplement cell encoding, only document-level layout.
//!         - Every writer must be exactly invertible by its reader. When a
//!           cell cannot be represented without extra markup, the encoder
//!           picks the minimal markup that keeps the text reversible.
//!
//! Architecture
//!
//!     The hard part is that the target formats are plain text with no
//!     reserved escape syntax. The engine therefore decides, per cell, how
//!     much markup is needed: nothing for a bare python cell, a comment
//!     prefix for markdown, an option header for tagged cells, and an
//!     end-of-cell marker chosen to never collide with the cell's own
//!     lines (cell/encoders.rs). The plain-script writer asks the reader
//!     (formats/pyscript.rs) how many lines it would consume, so the two
//!     sides agree on boundaries by construction rather than by parallel
//!     logic.
//!
//!     This is a pure library: no shell assumptions, no printing, no env
//!     vars. The nbtext-cli crate provides the command-line interface.
//!
//!     The file structure:
//!     .
//!     ├── error.rs               # FormatError
//!     ├── format.rs              # Format trait definition
//!     ├── registry.rs            # FormatRegistry for discovery and selection
//!     ├── notebook.rs            # Notebook, Cell, line splitting
//!     ├── cell
//!     │   ├── exporter.rs        # CellExporter orchestration
//!     │   ├── encoders.rs        # per-dialect encoders, marker allocation
//!     │   ├── metadata.rs        # filtering, activation, option codecs
//!     │   ├── languages.rs       # %%language directives
//!     │   └── magics.rs          # magic escaping
//!     └── formats
//!         ├── common             # document assembly/splitting helpers
//!         └── <format>/mod.rs    # reader + writer per format
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── mod.rs
//!
//!     Note that rust does not by default discover tests in
//!     subdirectories, so we need to include these in the mod.

pub mod cell;
pub mod error;
pub mod format;
pub mod formats;
pub mod notebook;
pub mod registry;

pub use cell::{CellExporter, Dialect};
pub use error::FormatError;
pub use format::Format;
pub use notebook::{Cell, CellType, Metadata, Notebook};
pub use registry::FormatRegistry;

/// Parse `source` with the named format from the default registry.
pub fn reads(source: &str, format: &str) -> Result<Notebook, FormatError> {
    FormatRegistry::with_defaults().parse(source, format)
}

/// Serialize `notebook` with the named format from the default registry.
pub fn writes(notebook: &Notebook, format: &str) -> Result<String, FormatError> {
    FormatRegistry::with_defaults().serialize(notebook, format)
}
