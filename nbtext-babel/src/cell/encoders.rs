//! Per-dialect code cell encoders
//!
//! Each target dialect is one variant of [`Dialect`] and carries one
//! encoder implementing the two-operation capability
//! `{encode_active, encode_inactive}`. The exporter selects the encoder
//! through explicit dispatch; dialect differences never leak into the
//! orchestration code.

use crate::cell::languages::fence_language;
use crate::cell::metadata::{metadata_to_json_options, metadata_to_rmd_options};
use crate::error::FormatError;
use crate::formats::pyscript::probe_cell_bounds;
use crate::notebook::Metadata;
use serde_json::Value;

/// Target text dialect for a cell export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Fenced R-Markdown-like chunks
    Rmd,
    /// R script with `#+` directives and `#'` commentary
    RScript,
    /// Plain python script with `# + {...}` markers
    PyScript,
}

impl Dialect {
    /// Tag used in `active` metadata values.
    pub fn tag(&self) -> &'static str {
        match self {
            Dialect::Rmd => "Rmd",
            Dialect::RScript => "R",
            Dialect::PyScript => "py",
        }
    }

    /// The language executed natively by this dialect, if any.
    pub fn native_language(&self) -> Option<&'static str> {
        match self {
            Dialect::Rmd => None,
            Dialect::RScript => Some("R"),
            Dialect::PyScript => Some("python"),
        }
    }

    /// Comment prefix for markdown cells; `None` means markdown passes
    /// through untouched.
    pub fn markdown_prefix(&self) -> Option<&'static str> {
        match self {
            Dialect::Rmd => None,
            Dialect::RScript => Some("#'"),
            Dialect::PyScript => Some("#"),
        }
    }

    pub(crate) fn encoder(&self) -> &'static dyn DialectEncoder {
        match self {
            Dialect::Rmd => &RmdEncoder,
            Dialect::RScript => &RScriptEncoder,
            Dialect::PyScript => &PyScriptEncoder,
        }
    }
}

/// Per-cell inputs shared by every encoder.
pub(crate) struct EncodeContext<'a> {
    pub language: &'a str,
    pub padlines: usize,
    /// Source lines before magic escaping or comment prefixing.
    pub original: &'a [String],
}

pub(crate) trait DialectEncoder {
    fn encode_active(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError>;

    fn encode_inactive(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError>;
}

/// Prefix every line; empty lines take the bare prefix so no trailing
/// whitespace is emitted. [`uncomment_lines`] is the inverse.
pub(crate) fn comment_lines(lines: &[String], prefix: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix} {line}")
            }
        })
        .collect()
}

pub(crate) fn uncomment_lines(lines: &[String], prefix: &str) -> Vec<String> {
    let spaced = format!("{prefix} ");
    lines
        .iter()
        .map(|line| {
            if let Some(rest) = line.strip_prefix(&spaced) {
                rest.to_string()
            } else if line == prefix {
                String::new()
            } else {
                line.clone()
            }
        })
        .collect()
}

struct RmdEncoder;

impl DialectEncoder for RmdEncoder {
    fn encode_active(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        let options = metadata_to_rmd_options(Some(fence_language(ctx.language)), metadata)?;
        let mut lines = vec![format!("```{{{options}}}")];
        lines.extend(source);
        lines.push("```".to_string());
        Ok(lines)
    }

    fn encode_inactive(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        metadata.insert("eval".to_string(), Value::Bool(false));
        self.encode_active(source, metadata, ctx)
    }
}

struct RScriptEncoder;

impl DialectEncoder for RScriptEncoder {
    fn encode_active(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        _ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        let options = metadata_to_rmd_options(None, metadata)?;
        let mut lines = Vec::new();
        // untagged cells stay visually identical to a plain R script
        if !options.is_empty() {
            lines.push(format!("#+ {options}"));
        }
        lines.extend(source);
        Ok(lines)
    }

    fn encode_inactive(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        metadata.insert("eval".to_string(), Value::Bool(false));
        let source = comment_lines(&source, "#");
        self.encode_active(source, metadata, ctx)
    }
}

struct PyScriptEncoder;

impl PyScriptEncoder {
    fn assemble(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        if explicit_start_marker(&source, ctx.original, metadata) {
            metadata.insert(
                "endofcell".to_string(),
                Value::String(py_endofcell_marker(&source)),
            );
        }
        code_to_py(source, metadata, ctx.padlines)
    }
}

impl DialectEncoder for PyScriptEncoder {
    fn encode_active(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        self.assemble(source, metadata, ctx)
    }

    fn encode_inactive(
        &self,
        source: Vec<String>,
        metadata: &mut Metadata,
        ctx: &EncodeContext,
    ) -> Result<Vec<String>, FormatError> {
        let source = comment_lines(&source, "#");
        self.assemble(source, metadata, ctx)
    }
}

/// Does the plain-script form of this cell need an explicit start/end
/// marker pair to decode back to the same boundaries?
///
/// Markers are needed when the cell carries metadata (there is no header
/// line without them), when every original line is a comment (a bare
/// re-parse would read the cell as markdown), or when the plain-script
/// reader would not consume exactly the cell's lines. The last check asks
/// the reader directly instead of re-deriving its boundary rules.
///
/// The all-comment check runs on the lines before magic escaping, so a
/// cell made only of magic or shell lines (`!ls` written as `# !ls`)
/// gets no markers and reads back as markdown. Same caveat class as
/// [`CellExporter::markdown_escape`](crate::cell::CellExporter::markdown_escape).
pub fn explicit_start_marker(source: &[String], original: &[String], metadata: &Metadata) -> bool {
    if !metadata.is_empty() {
        return true;
    }
    if original.iter().all(|line| line.starts_with('#')) {
        return true;
    }
    probe_cell_bounds(source) != source.len()
}

/// Find the shortest `-`, `--`, `---`, ... token such that no source line
/// is `# <token>` (up to trailing whitespace). Terminates because only
/// finitely many lines can collide while the token keeps growing.
pub fn py_endofcell_marker(source: &[String]) -> String {
    let mut endofcell = "-".to_string();
    loop {
        let collision = source
            .iter()
            .any(|line| is_end_marker(line, &endofcell));
        if !collision {
            return endofcell;
        }
        endofcell.push('-');
    }
}

/// Does this line close a cell with the given end-of-cell token?
pub(crate) fn is_end_marker(line: &str, endofcell: &str) -> bool {
    line.strip_prefix("# ")
        .and_then(|rest| rest.strip_prefix(endofcell))
        .is_some_and(|tail| tail.trim().is_empty())
}

fn code_to_py(
    source: Vec<String>,
    metadata: &mut Metadata,
    padlines: usize,
) -> Result<Vec<String>, FormatError> {
    // the common case: no metadata, no markers, the source stands alone
    if metadata.is_empty() {
        return Ok(source);
    }
    let endofcell = match metadata.remove("endofcell") {
        Some(Value::String(token)) => token,
        _ => "-".to_string(),
    };
    // the default token adds no visible noise to the start line
    if endofcell != "-" {
        metadata.insert("endofcell".to_string(), Value::String(endofcell.clone()));
    }
    let options = metadata_to_json_options(metadata)?;
    let mut lines = vec![format!("# + {options}")];
    lines.extend(source);
    lines.extend(std::iter::repeat_with(String::new).take(padlines));
    lines.push(format!("# {endofcell}"));
    Ok(lines)
}
