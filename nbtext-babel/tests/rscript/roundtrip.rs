//! Round-trip tests (script → notebook → script, and back)

use crate::common::{assert_notebook_survives, reads, writes};
use nbtext_babel::{Cell, Notebook};
use serde_json::json;

fn assert_document_stable(document: &str) {
    let notebook = reads(document, "rscript");
    assert_eq!(writes(&notebook, "rscript"), document);
}

#[test]
fn plain_script_is_stable() {
    assert_document_stable("library(stats)\n\nx <- rnorm(10)\nmean(x)\n");
}

#[test]
fn commentary_and_code_are_stable() {
    assert_document_stable("#' A title\n#'\n#' and a body\n\nx <- 1\n");
}

#[test]
fn directive_cells_are_stable() {
    assert_document_stable("#+ echo=TRUE\nls()\n");
}

#[test]
fn spaced_directive_normalizes_and_stays_writable() {
    let notebook = reads("#+ echo = TRUE\nls()\n", "rscript");
    assert_eq!(writes(&notebook, "rscript"), "#+ echo=TRUE\nls()\n");
}

#[test]
fn demoted_python_cells_are_stable() {
    assert_document_stable("#+ active=\"ipynb\", language=\"python\", eval=FALSE\n# x = 1\n");
}

#[test]
fn notebook_with_python_cells_survives() {
    let mut notebook = Notebook::new(vec![
        Cell::markdown("Analysis notes"),
        Cell::code("import numpy as np"),
    ]);
    notebook
        .metadata
        .insert("main_language".to_string(), json!("python"));
    assert_notebook_survives(&notebook, "rscript");
}

#[test]
fn r_notebook_survives() {
    let notebook = Notebook::new(vec![
        Cell::markdown("Summary stats"),
        Cell::code("x <- rnorm(10)\nmean(x)"),
        Cell::raw("reference output"),
    ]);
    assert_notebook_survives(&notebook, "rscript");
}
