//! Notebook JSON container (nbformat 4)
//!
//! The native on-disk form. Only the parts this crate models are read
//! (cell type, source, metadata, notebook metadata); outputs and
//! execution counts are emitted empty on write.

use crate::error::FormatError;
use crate::format::Format;
use crate::notebook::{Cell, CellType, Metadata, Notebook};
use serde_json::{json, Value};

/// nbformat 4 JSON container
pub struct IpynbFormat;

impl Format for IpynbFormat {
    fn name(&self) -> &str {
        "ipynb"
    }

    fn description(&self) -> &str {
        "Jupyter notebook JSON (nbformat 4)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["ipynb"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Notebook, FormatError> {
        let root: Value = serde_json::from_str(source)?;
        let root = root
            .as_object()
            .ok_or_else(|| FormatError::ParseError("notebook must be a JSON object".to_string()))?;
        let metadata = root
            .get("metadata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let mut cells = Vec::new();
        for entry in root
            .get("cells")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            cells.push(parse_cell(entry)?);
        }
        Ok(Notebook::new(cells).with_metadata(metadata))
    }

    fn serialize(&self, notebook: &Notebook) -> Result<String, FormatError> {
        let cells: Vec<Value> = notebook.cells.iter().map(serialize_cell).collect();
        let root = json!({
            "cells": cells,
            "metadata": Value::Object(notebook.metadata.clone()),
            "nbformat": 4,
            "nbformat_minor": 4,
        });
        serde_json::to_string_pretty(&root)
            .map(|text| text + "\n")
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}

fn parse_cell(entry: &Value) -> Result<Cell, FormatError> {
    let object = entry
        .as_object()
        .ok_or_else(|| FormatError::ParseError("cell must be a JSON object".to_string()))?;
    let cell_type = object
        .get("cell_type")
        .and_then(Value::as_str)
        .and_then(CellType::from_name)
        .ok_or_else(|| FormatError::ParseError("missing or unknown cell_type".to_string()))?;
    let source = match object.get("source") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    };
    let metadata: Metadata = object
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    Ok(Cell::new(cell_type, source).with_metadata(metadata))
}

fn serialize_cell(cell: &Cell) -> Value {
    let source: Vec<&str> = cell.source.split_inclusive('\n').collect();
    let mut object = Metadata::new();
    object.insert(
        "cell_type".to_string(),
        Value::from(cell.cell_type.as_str()),
    );
    object.insert("metadata".to_string(), Value::Object(cell.metadata.clone()));
    object.insert("source".to_string(), json!(source));
    if cell.cell_type == CellType::Code {
        object.insert("execution_count".to_string(), Value::Null);
        object.insert("outputs".to_string(), json!([]));
    }
    Value::Object(object)
}
