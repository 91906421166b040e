//! Candidate normalization and per-function uniqueness.

use std::collections::HashSet;

/// C89–C11 keywords. A symbol renamed to one of these would no longer parse,
/// so every scope starts with them reserved.
pub const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
];

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Collapse every run of characters outside `[A-Za-z0-9_]` into a single `_`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii() && is_ident_byte(c as u8) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// `true` if `name` is non-empty and made only of `[A-Za-z0-9_]`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_ident_byte)
}

/// Names already claimed inside one function.
///
/// Claims must happen in extraction order so that identical inputs always
/// produce identical suffixes.
#[derive(Debug, Clone)]
pub struct NameScope {
    taken: HashSet<String>,
}

impl Default for NameScope {
    fn default() -> Self {
        Self::new()
    }
}

impl NameScope {
    /// A scope with only the C keywords reserved.
    #[must_use]
    pub fn new() -> Self {
        Self {
            taken: C_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// A scope that additionally reserves `names` (identifiers the function
    /// references but does not own).
    #[must_use]
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scope = Self::new();
        scope.taken.extend(names.into_iter().map(Into::into));
        scope
    }

    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// `base` if free, otherwise `base_0`, `base_1`, … whichever comes first.
    #[must_use]
    pub fn make_unique(&self, base: &str) -> String {
        if !self.is_taken(base) {
            return base.to_string();
        }
        let mut i = 0usize;
        loop {
            let candidate = format!("{base}_{i}");
            if !self.is_taken(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }

    /// Turn an oracle candidate into a final, unique identifier and claim it.
    ///
    /// A missing or blank candidate falls back to `original`, which then goes
    /// through the same normalization and collision handling.
    pub fn claim(&mut self, candidate: Option<&str>, original: &str) -> String {
        let raw = candidate
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(original);

        let mut base = normalize_name(raw);
        if base.starts_with(|c: char| c.is_ascii_digit()) {
            base.insert(0, '_');
        }

        let name = self.make_unique(&base);
        self.taken.insert(name.clone());
        name
    }
}
