//! Export tests (notebook → fenced document)

use crate::common::writes;
use insta::assert_snapshot;
use nbtext_babel::{Cell, Notebook};
use serde_json::{json, Value};

fn with_metadata(mut cell: Cell, key: &str, value: Value) -> Cell {
    cell.metadata.insert(key.to_string(), value);
    cell
}

#[test]
fn front_matter_is_emitted_verbatim() {
    let notebook = Notebook::new(vec![
        Cell::raw("---\ntitle: Simple file\n---"),
        Cell::markdown("Some text"),
    ]);
    assert_eq!(
        writes(&notebook, "rmd"),
        "---\ntitle: Simple file\n---\n\nSome text\n"
    );
}

#[test]
fn front_matter_only_notebook_is_just_the_header() {
    let notebook = Notebook::new(vec![Cell::raw("---\ntitle: Simple file\n---")]);
    assert_eq!(writes(&notebook, "rmd"), "---\ntitle: Simple file\n---\n");
}

#[test]
fn metadata_renders_as_chunk_options() {
    let notebook = Notebook::new(vec![with_metadata(
        Cell::code("x = 1"),
        "echo",
        json!(true),
    )]);
    assert_eq!(
        writes(&notebook, "rmd"),
        "```{python, echo=TRUE}\nx = 1\n```\n"
    );
}

#[test]
fn vector_and_string_options_use_r_syntax() {
    let cell = with_metadata(
        with_metadata(Cell::code("x = 1"), "fig.dim", json!([8, 6])),
        "results",
        json!("asis"),
    );
    let notebook = Notebook::new(vec![cell]);
    assert_eq!(
        writes(&notebook, "rmd"),
        "```{python, fig.dim=c(8, 6), results=\"asis\"}\nx = 1\n```\n"
    );
}

#[test]
fn foreign_cells_move_the_directive_into_the_chunk_head() {
    let notebook = Notebook::new(vec![Cell::code("%%R -i x\nls()")]);
    assert_eq!(
        writes(&notebook, "rmd"),
        "```{r, magic_args=\"-i x\"}\nls()\n```\n"
    );
}

#[test]
fn inert_cells_carry_eval_false() {
    let notebook = Notebook::new(vec![with_metadata(
        Cell::code("slow_computation()"),
        "active",
        json!("ipynb"),
    )]);
    assert_eq!(
        writes(&notebook, "rmd"),
        "```{python, active=\"ipynb\", eval=FALSE}\nslow_computation()\n```\n"
    );
}

#[test]
fn export_of_a_mixed_document() {
    let notebook = Notebook::new(vec![
        Cell::raw("---\ntitle: Mixed\n---"),
        Cell::markdown("A paragraph"),
        Cell::code("x = 1"),
        Cell::code("%%R\nls()"),
    ]);
    assert_snapshot!(writes(&notebook, "rmd"), @r###"
    ---
    title: Mixed
    ---

    A paragraph

    ```{python}
    x = 1
    ```

    ```{r}
    ls()
    ```
    "###);
}
