//! Escaping of interactive magics inside active cells
//!
//! Line magics (`%time ...`) and shell escapes (`!ls`) are interpreter
//! features, not Python; left bare they would break a script. Active
//! python cells get them commented out on export and uncommented on
//! import. Inactive cells are commented wholesale elsewhere and need no
//! per-line treatment.

use crate::cell::languages::same_language;
use regex::Regex;
use std::sync::OnceLock;

fn magic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)[%!]").expect("valid regex"))
}

fn escaped_magic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)# [%!]").expect("valid regex"))
}

/// Comment out magic lines so the exported script stays runnable.
pub fn escape_magic(lines: &mut [String], language: &str) {
    if !same_language(language, "python") {
        return;
    }
    for line in lines.iter_mut() {
        if let Some(captures) = magic_re().captures(line) {
            let indent = captures[1].len();
            *line = format!("{}# {}", &line[..indent], &line[indent..]);
        }
    }
}

/// Reverse of [`escape_magic`].
pub fn unescape_magic(lines: &mut [String], language: &str) {
    if !same_language(language, "python") {
        return;
    }
    for line in lines.iter_mut() {
        if let Some(captures) = escaped_magic_re().captures(line) {
            let indent = captures[1].len();
            *line = format!("{}{}", &line[..indent], &line[indent + 2..]);
        }
    }
}
