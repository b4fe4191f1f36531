//! Import tests (R script → notebook)

use crate::common::{assert_cells_match, reads};
use nbtext_babel::{Cell, CellType};
use serde_json::{json, Value};

fn with_metadata(mut cell: Cell, key: &str, value: Value) -> Cell {
    cell.metadata.insert(key.to_string(), value);
    cell
}

#[test]
fn document_declares_r() {
    let notebook = reads("ls()\n", "rscript");
    assert_eq!(notebook.main_language(), Some("R"));
}

#[test]
fn commentary_becomes_markdown() {
    let notebook = reads("#' A title\n#'\n#' and a body\n\nls()\n", "rscript");
    assert_cells_match(
        &notebook,
        &[
            Cell::markdown("A title\n\nand a body"),
            Cell::code("ls()"),
        ],
    );
}

#[test]
fn directive_lines_carry_cell_metadata() {
    let notebook = reads("#+ echo=TRUE\nls()\n", "rscript");
    assert_cells_match(
        &notebook,
        &[with_metadata(Cell::code("ls()"), "echo", json!(true))],
    );
}

#[test]
fn chunk_labels_survive_as_names() {
    let notebook = reads("#+ setup, include=FALSE\nlibrary(stats)\n", "rscript");
    let cell = &notebook.cells[0];
    assert_eq!(cell.metadata.get("name"), Some(&json!("setup")));
    assert_eq!(cell.metadata.get("include"), Some(&Value::Bool(false)));
}

#[test]
fn code_stops_at_commentary_and_directives() {
    let notebook = reads("x <- 1\n#' next\n\ny <- 2\n#+ echo=FALSE\nz <- 3\n", "rscript");
    assert_eq!(notebook.cells.len(), 4);
    assert_eq!(notebook.cells[0].source, "x <- 1");
    assert_eq!(notebook.cells[1].cell_type, CellType::Markdown);
    assert_eq!(notebook.cells[2].source, "y <- 2");
    assert_eq!(notebook.cells[3].source, "z <- 3");
}

#[test]
fn demoted_python_cells_decode_as_code() {
    let doc = "#+ language=\"python\", active=\"ipynb\", eval=FALSE\n# x = 1\n";
    let notebook = reads(doc, "rscript");
    let cell = &notebook.cells[0];
    assert_eq!(cell.cell_type, CellType::Code);
    assert_eq!(cell.source, "x = 1");
}
