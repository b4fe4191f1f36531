//! Import tests (python script → notebook)

use crate::common::{assert_cells_match, reads};
use nbtext_babel::{Cell, CellType};
use serde_json::{json, Value};

#[test]
fn paragraphs_split_on_blank_lines() {
    let notebook = reads("x = 1\n\ny = 2\nz = 3\n", "pyscript");
    assert_cells_match(
        &notebook,
        &[Cell::code("x = 1"), Cell::code("y = 2\nz = 3")],
    );
}

#[test]
fn document_declares_python() {
    let notebook = reads("x = 1\n", "pyscript");
    assert_eq!(notebook.main_language(), Some("python"));
}

#[test]
fn comment_runs_become_markdown() {
    let notebook = reads("# A header\n#\n# and a body\n\nx = 1\n", "pyscript");
    assert_cells_match(
        &notebook,
        &[Cell::markdown("A header\n\nand a body"), Cell::code("x = 1")],
    );
}

#[test]
fn escaped_magics_are_restored() {
    let notebook = reads("# %matplotlib inline\nplot()\n", "pyscript");
    assert_cells_match(&notebook, &[Cell::code("%matplotlib inline\nplot()")]);
}

#[test]
fn marked_cell_keeps_metadata_and_padlines() {
    let notebook = reads("# + {\"echo\":true}\nx = 1\n\n\n# -\n", "pyscript");
    assert_eq!(notebook.cells.len(), 1);
    let cell = &notebook.cells[0];
    assert_eq!(cell.cell_type, CellType::Code);
    assert_eq!(cell.source, "x = 1");
    assert_eq!(cell.metadata.get("echo"), Some(&Value::Bool(true)));
    assert_eq!(cell.metadata.get("padlines"), Some(&json!(2)));
}

#[test]
fn wide_separators_are_recorded_as_skiplines() {
    let notebook = reads("x = 1\n\n\n\ny = 2\n", "pyscript");
    assert_eq!(notebook.cells[0].metadata.get("skiplines"), Some(&json!(3)));
    assert!(notebook.cells[1].metadata.get("skiplines").is_none());
}

#[test]
fn surrounding_blank_lines_are_not_cells() {
    let notebook = reads("\n\nx = 1\n\n\n", "pyscript");
    assert_eq!(notebook.cells.len(), 1);
    assert_eq!(notebook.cells[0].source, "x = 1");
    assert!(notebook.cells[0].metadata.get("skiplines").is_none());
}
