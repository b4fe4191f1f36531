//! Shared helpers for the format round-trip tests.
//!
//! Writers are allowed to add a handful of keys whose only job is to
//! keep the emitted text reversible; readers hand them back. Cell
//! comparisons here ignore those keys so tests can state what a user
//! would see in the notebook.

use nbtext_babel::{Cell, Metadata, Notebook};

const FIDELITY_KEYS: &[&str] = &[
    "endofcell",
    "active",
    "language",
    "eval",
    "skiplines",
    "padlines",
];

pub fn reads(source: &str, format: &str) -> Notebook {
    nbtext_babel::reads(source, format).expect("document to parse")
}

pub fn writes(notebook: &Notebook, format: &str) -> String {
    nbtext_babel::writes(notebook, format).expect("notebook to serialize")
}

fn visible_metadata(cell: &Cell) -> Metadata {
    cell.metadata
        .iter()
        .filter(|(key, _)| !FIDELITY_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Compare parsed cells against expectations, ignoring fidelity keys.
pub fn assert_cells_match(notebook: &Notebook, expected: &[Cell]) {
    assert_eq!(
        notebook.cells.len(),
        expected.len(),
        "cell count mismatch: {:?}",
        notebook.cells
    );
    for (actual, wanted) in notebook.cells.iter().zip(expected) {
        assert_eq!(actual.cell_type, wanted.cell_type, "for {:?}", actual.source);
        assert_eq!(actual.source, wanted.source);
        assert_eq!(visible_metadata(actual), visible_metadata(wanted));
    }
}

/// Serialize to `format` and parse the result back; the visible cells
/// must survive unchanged.
pub fn assert_notebook_survives(notebook: &Notebook, format: &str) {
    let text = writes(notebook, format);
    let back = reads(&text, format);
    assert_cells_match(&back, &notebook.cells);
}

#[test]
fn notebook_json_survives_every_text_format() {
    let notebook = Notebook::new(vec![
        Cell::markdown("A header\n\nwith two paragraphs"),
        Cell::code("x = 1\ny = 2"),
    ]);
    for format in ["ipynb", "pyscript", "rmd", "rscript"] {
        assert_notebook_survives(&notebook, format);
    }
}
