//! Export tests (notebook → python script)

use crate::common::writes;
use insta::assert_snapshot;
use nbtext_babel::{Cell, Notebook};
use serde_json::json;

fn with_metadata(mut cell: Cell, key: &str, value: serde_json::Value) -> Cell {
    cell.metadata.insert(key.to_string(), value);
    cell
}

#[test]
fn bare_cells_are_separated_by_one_blank_line() {
    let notebook = Notebook::new(vec![Cell::code("1 + 1"), Cell::code("2 + 2")]);
    assert_eq!(writes(&notebook, "pyscript"), "1 + 1\n\n2 + 2\n");
}

#[test]
fn markdown_is_commented() {
    let notebook = Notebook::new(vec![Cell::markdown("A header"), Cell::code("1 + 1")]);
    assert_eq!(writes(&notebook, "pyscript"), "# A header\n\n1 + 1\n");
}

#[test]
fn metadata_forces_an_explicit_marker_pair() {
    let notebook = Notebook::new(vec![with_metadata(Cell::code("x = 1"), "echo", json!(true))]);
    assert_eq!(
        writes(&notebook, "pyscript"),
        "# + {\"echo\":true}\nx = 1\n# -\n"
    );
}

#[test]
fn inner_blank_lines_force_an_explicit_marker_pair() {
    let notebook = Notebook::new(vec![Cell::code("x = 1\n\ny = 2")]);
    assert_eq!(writes(&notebook, "pyscript"), "# + {}\nx = 1\n\ny = 2\n# -\n");
}

#[test]
fn raw_cells_are_commented_and_marked_inert() {
    let notebook = Notebook::new(vec![Cell::raw("config")]);
    assert_eq!(
        writes(&notebook, "pyscript"),
        "# + {\"active\":\"\"}\n# config\n# -\n"
    );
}

#[test]
fn end_marker_grows_past_colliding_source_lines() {
    let notebook = Notebook::new(vec![with_metadata(
        Cell::code("x = 1\n# -"),
        "echo",
        json!(true),
    )]);
    assert_eq!(
        writes(&notebook, "pyscript"),
        "# + {\"echo\":true,\"endofcell\":\"--\"}\nx = 1\n# -\n# --\n"
    );
}

#[test]
fn skiplines_controls_the_separator_width() {
    let notebook = Notebook::new(vec![
        with_metadata(Cell::code("x = 1"), "skiplines", json!(3)),
        Cell::code("y = 2"),
    ]);
    assert_eq!(writes(&notebook, "pyscript"), "x = 1\n\n\n\ny = 2\n");
}

#[test]
fn export_of_a_mixed_document() {
    let notebook = Notebook::new(vec![
        Cell::markdown("Some analysis"),
        Cell::code("import numpy as np"),
        Cell::code("%matplotlib inline\nplot()"),
    ]);
    assert_snapshot!(writes(&notebook, "pyscript"), @r###"
    # Some analysis

    import numpy as np

    # %matplotlib inline
    plot()
    "###);
}
