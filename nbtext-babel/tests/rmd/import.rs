//! Import tests (fenced document → notebook)

use crate::common::{assert_cells_match, reads};
use nbtext_babel::{Cell, CellType};
use serde_json::{json, Value};

fn with_metadata(mut cell: Cell, key: &str, value: Value) -> Cell {
    cell.metadata.insert(key.to_string(), value);
    cell
}

pub const SIMPLE_DOC: &str = r#"---
title: Simple file
---

```{python, echo=TRUE}
import numpy as np
x = np.arange(0, 2*math.pi, eps)
```

```{python, echo=TRUE}
x = np.arange(0,1,eps)
y = np.abs(x)-.5
```

```{r}
ls()
```

```{r, results="asis", magic_args="-i x"}
cat(stringi::stri_rand_lipsum(3), sep='\n\n')
```
"#;

#[test]
fn reference_document_parses_to_the_expected_cells() {
    let notebook = reads(SIMPLE_DOC, "rmd");
    assert_cells_match(
        &notebook,
        &[
            Cell::raw("---\ntitle: Simple file\n---"),
            with_metadata(
                Cell::code("import numpy as np\nx = np.arange(0, 2*math.pi, eps)"),
                "echo",
                json!(true),
            ),
            with_metadata(
                Cell::code("x = np.arange(0,1,eps)\ny = np.abs(x)-.5"),
                "echo",
                json!(true),
            ),
            Cell::code("%%R\nls()"),
            with_metadata(
                Cell::code("%%R -i x\ncat(stringi::stri_rand_lipsum(3), sep='\\n\\n')"),
                "results",
                json!("asis"),
            ),
        ],
    );
}

#[test]
fn document_language_defaults_to_python() {
    let notebook = reads(SIMPLE_DOC, "rmd");
    assert_eq!(notebook.main_language(), Some("python"));
}

#[test]
fn front_matter_can_declare_the_main_language() {
    let doc = "---\nmain_language: R\n---\n\n```{r}\nls()\n```\n";
    let notebook = reads(doc, "rmd");
    assert_eq!(notebook.main_language(), Some("R"));
    // the chunk matches the main language, so no directive is added
    assert_eq!(notebook.cells[1].source, "ls()");
}

#[test]
fn markdown_between_chunks_is_one_cell() {
    let doc = "Some text\n\nmore text\n\n```{python}\nx = 1\n```\n";
    let notebook = reads(doc, "rmd");
    assert_cells_match(
        &notebook,
        &[
            Cell::markdown("Some text\n\nmore text"),
            Cell::code("x = 1"),
        ],
    );
}

#[test]
fn plain_fences_stay_inside_markdown() {
    let doc = "```python\n1 + 1\n```\n\n```{python}\nx = 1\n```\n";
    let notebook = reads(doc, "rmd");
    assert_eq!(notebook.cells[0].cell_type, CellType::Markdown);
    assert_eq!(notebook.cells[0].source, "```python\n1 + 1\n```");
    assert_eq!(notebook.cells[1].cell_type, CellType::Code);
}

#[test]
fn quoted_option_values_keep_their_commas() {
    let doc = "```{python, title=\"a, b\"}\nx = 1\n```\n";
    let notebook = reads(doc, "rmd");
    assert_eq!(notebook.cells[0].metadata.get("title"), Some(&json!("a, b")));
}

#[test]
fn chunk_options_accept_spaces_around_equals() {
    let doc = "```{python, fig.width = 8, echo =TRUE}\nx = 1\n```\n";
    let notebook = reads(doc, "rmd");
    assert_eq!(notebook.cells[0].metadata.get("fig.width"), Some(&json!(8)));
    assert_eq!(notebook.cells[0].metadata.get("echo"), Some(&json!(true)));
}

#[test]
fn r_vector_options_become_arrays() {
    let doc = "```{python, fig.dim=c(8, 6)}\nx = 1\n```\n";
    let notebook = reads(doc, "rmd");
    assert_eq!(
        notebook.cells[0].metadata.get("fig.dim"),
        Some(&json!([8, 6]))
    );
}

#[test]
fn inactive_chunks_decode_as_raw() {
    let doc = "```{python, active=\"\", eval=FALSE}\nreference text\n```\n";
    let notebook = reads(doc, "rmd");
    assert_eq!(notebook.cells[0].cell_type, CellType::Raw);
    assert_eq!(notebook.cells[0].source, "reference text");
}
