//! The per-cell encoding engine and its collaborators
//!
//! `exporter` orchestrates: it normalizes a cell, decides code vs
//! markdown treatment, and dispatches to the dialect encoders in
//! `encoders`. The remaining modules are the collaborators those two
//! consume: metadata filtering and option codecs, language directives,
//! and magic escaping.

pub mod encoders;
pub mod exporter;
pub mod languages;
pub mod magics;
pub mod metadata;

pub use encoders::{explicit_start_marker, py_endofcell_marker, Dialect};
pub use exporter::CellExporter;
