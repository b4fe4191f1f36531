//! Cell metadata filtering, activation policy, and option-string codecs
//!
//! Two option syntaxes are used by the text dialects:
//! - an R-flavored `key=value` list for fenced chunks and `#+` directives
//!   (booleans as `TRUE`/`FALSE`, lists as `c(...)`, maps as `list(...)`)
//! - a single JSON object for plain-script `# + {...}` start markers
//!
//! Both directions are implemented here so that whatever a writer emits,
//! the matching reader recovers the exact metadata values.

use crate::error::FormatError;
use crate::notebook::Metadata;
use serde_json::Value;

/// Layout keys consumed by the exporter itself, never written to text.
const TRANSIENT_KEYS: &[&str] = &["padlines", "skiplines", "skipline", "noskipline"];

/// Notebook UI state that has no meaning in a text representation.
const INTERNAL_KEYS: &[&str] = &[
    "collapsed",
    "scrolled",
    "autoscroll",
    "deletable",
    "format",
    "trusted",
];

/// Copy `metadata` without its transient and notebook-internal keys.
pub fn filter_metadata(metadata: &Metadata) -> Metadata {
    metadata
        .iter()
        .filter(|(key, _)| {
            !TRANSIENT_KEYS.contains(&key.as_str()) && !INTERNAL_KEYS.contains(&key.as_str())
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Is a cell with this metadata executable in the given dialect?
///
/// Without an `active` key every cell is active. Otherwise the value is a
/// comma-separated tag list; `all` matches every dialect and the empty
/// string matches none.
pub fn is_active(tag: &str, metadata: &Metadata) -> bool {
    match metadata.get("active") {
        None => true,
        Some(Value::String(active)) => active
            .split(',')
            .map(str::trim)
            .any(|entry| entry == "all" || entry == tag),
        // a non-string value does not deactivate anything
        Some(_) => true,
    }
}

// ---------------------------------------------------------------------------
// R-flavored options (fenced chunks and #+ directives)
// ---------------------------------------------------------------------------

/// Serialize `(language, metadata)` to an R-flavored option string.
///
/// The language, when given, comes first without a key:
/// `python, echo=TRUE, tags=c("parameters")`.
pub fn metadata_to_rmd_options(
    language: Option<&str>,
    metadata: &Metadata,
) -> Result<String, FormatError> {
    let mut parts = Vec::new();
    if let Some(language) = language {
        parts.push(language.to_string());
    }
    for (key, value) in metadata {
        check_option_key(key)?;
        parts.push(format!("{key}={}", to_r_value(value)?));
    }
    Ok(parts.join(", "))
}

/// Parse an option string back into `(language, metadata)`.
///
/// Accepts both `r, echo=TRUE` and the space-separated `r echo=TRUE` head.
pub fn rmd_options_to_metadata(options: &str) -> Result<(Option<String>, Metadata), FormatError> {
    let mut metadata = Metadata::new();
    let mut language = None;
    for (index, token) in split_top_level(options, ',').into_iter().enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let mut token = token.to_string();
        if index == 0 {
            let (head, rest) = split_language_head(&token);
            language = head;
            match rest {
                Some(rest) => token = rest,
                None => continue,
            }
        }
        let (key, value) = token.split_once('=').ok_or_else(|| {
            FormatError::ParseError(format!("option '{token}' is not of the form key=value"))
        })?;
        metadata.insert(key.trim().to_string(), parse_r_value(value)?);
    }
    Ok((language, metadata))
}

/// Split the first option token into a language head and a leftover option.
fn split_language_head(token: &str) -> (Option<String>, Option<String>) {
    if !token.contains('=') {
        return (Some(token.to_string()), None);
    }
    if let Some((head, rest)) = token.split_once(char::is_whitespace) {
        let rest = rest.trim();
        // `echo = TRUE` is one option written with spaces around the
        // separator, not a head followed by `= TRUE`
        if !head.contains('=') && !rest.starts_with('=') {
            return (Some(head.to_string()), Some(rest.to_string()));
        }
    }
    (None, Some(token.to_string()))
}

fn to_r_value(value: &Value) -> Result<String, FormatError> {
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(true) => Ok("TRUE".to_string()),
        Value::Bool(false) => Ok("FALSE".to_string()),
        Value::Number(number) => Ok(number.to_string()),
        Value::String(text) => Ok(quote_r_string(text)),
        Value::Array(items) => {
            let rendered: Result<Vec<_>, _> = items.iter().map(to_r_value).collect();
            Ok(format!("c({})", rendered?.join(", ")))
        }
        Value::Object(map) => {
            let mut rendered = Vec::new();
            for (key, value) in map {
                check_option_key(key)?;
                rendered.push(format!("{key}={}", to_r_value(value)?));
            }
            Ok(format!("list({})", rendered.join(", ")))
        }
    }
}

fn quote_r_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Option keys must be bare identifiers, or the string would not re-parse.
fn check_option_key(key: &str) -> Result<(), FormatError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' || ch == '-')
        && !key.starts_with(|ch: char| ch.is_ascii_digit() || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(FormatError::SerializationError(format!(
            "metadata key '{key}' cannot be written as an option"
        )))
    }
}

fn parse_r_value(text: &str) -> Result<Value, FormatError> {
    let text = text.trim();
    match text {
        "TRUE" | "true" => return Ok(Value::Bool(true)),
        "FALSE" | "false" => return Ok(Value::Bool(false)),
        "NULL" => return Ok(Value::Null),
        _ => {}
    }
    if text.starts_with('"') || text.starts_with('\'') {
        return unquote_r_string(text);
    }
    if let Some(inner) = text.strip_prefix("c(").and_then(|t| t.strip_suffix(')')) {
        let items: Result<Vec<_>, _> = split_top_level(inner, ',')
            .iter()
            .filter(|item| !item.trim().is_empty())
            .map(|item| parse_r_value(item))
            .collect();
        return Ok(Value::Array(items?));
    }
    if let Some(inner) = text.strip_prefix("list(").and_then(|t| t.strip_suffix(')')) {
        let mut map = Metadata::new();
        for entry in split_top_level(inner, ',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (key, value) = entry.split_once('=').ok_or_else(|| {
                FormatError::ParseError(format!("list entry '{entry}' is not of the form key=value"))
            })?;
            map.insert(key.trim().to_string(), parse_r_value(value)?);
        }
        return Ok(Value::Object(map));
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    if let Ok(float) = text.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Ok(Value::Number(number));
        }
    }
    // bare word (an unquoted R expression); kept verbatim as a string
    Ok(Value::String(text.to_string()))
}

fn unquote_r_string(text: &str) -> Result<Value, FormatError> {
    let mut chars = text.chars();
    let quote = chars.next().unwrap_or('"');
    let mut result = String::new();
    let mut escaped = false;
    for ch in chars {
        if escaped {
            result.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Ok(Value::String(result));
        } else {
            result.push(ch);
        }
    }
    Err(FormatError::ParseError(format!(
        "unterminated string in option value: {text}"
    )))
}

/// Split on `sep`, ignoring separators inside quotes or parentheses.
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in text.chars() {
        if let Some(q) = quote {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            _ if ch == sep && depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

// ---------------------------------------------------------------------------
// JSON options (plain-script start markers)
// ---------------------------------------------------------------------------

/// Serialize metadata as a single JSON object.
pub fn metadata_to_json_options(metadata: &Metadata) -> Result<String, FormatError> {
    serde_json::to_string(&Value::Object(metadata.clone()))
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}

/// Parse a JSON option object back into metadata.
pub fn json_options_to_metadata(options: &str) -> Result<Metadata, FormatError> {
    match serde_json::from_str(options)? {
        Value::Object(map) => Ok(map),
        other => Err(FormatError::ParseError(format!(
            "expected a JSON object in cell options, got: {other}"
        ))),
    }
}
