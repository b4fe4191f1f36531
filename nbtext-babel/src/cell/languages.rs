//! Language directives embedded in cell sources
//!
//! A cell whose first line is `%%<language> [args]` declares its own
//! language, overriding the notebook default. Detection is non-mutating;
//! each dialect decides whether the directive line stays in the source.

/// Languages recognized behind a `%%` directive.
pub const JUPYTER_LANGUAGES: &[&str] = &[
    "python",
    "R",
    "r",
    "julia",
    "bash",
    "sh",
    "javascript",
    "js",
    "perl",
];

/// A parsed `%%language [args]` first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDirective {
    pub language: String,
    pub magic_args: Option<String>,
}

impl LanguageDirective {
    /// Render back to the `%%language [args]` line form.
    pub fn to_line(&self) -> String {
        match &self.magic_args {
            Some(args) => format!("%%{} {args}", magic_language(&self.language)),
            None => format!("%%{}", magic_language(&self.language)),
        }
    }
}

/// Inspect the first source line for a language directive.
pub fn cell_language(lines: &[String]) -> Option<LanguageDirective> {
    let first = lines.first()?;
    let rest = first.strip_prefix("%%")?;
    let (word, args) = match rest.split_once(' ') {
        Some((word, args)) => (word, Some(args)),
        None => (rest, None),
    };
    if !JUPYTER_LANGUAGES.contains(&word) {
        return None;
    }
    let magic_args = args
        .map(str::trim)
        .filter(|args| !args.is_empty())
        .map(str::to_string);
    Some(LanguageDirective {
        language: canonical_language(word).to_string(),
        magic_args,
    })
}

/// Canonical spelling used for language comparison (`r` and `R` are one).
pub fn canonical_language(language: &str) -> &str {
    if language.eq_ignore_ascii_case("r") {
        "R"
    } else {
        language
    }
}

/// Spelling used in fenced chunk heads (`R` is written `r`).
pub fn fence_language(language: &str) -> &str {
    if language.eq_ignore_ascii_case("r") {
        "r"
    } else {
        language
    }
}

/// Spelling used in `%%` directives (`r` is written `R`).
pub fn magic_language(language: &str) -> &str {
    canonical_language(language)
}

/// Do two language names denote the same language?
pub fn same_language(a: &str, b: &str) -> bool {
    canonical_language(a) == canonical_language(b)
}
