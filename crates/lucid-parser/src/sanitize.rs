//! Disassembler symbol sanitizing.
//!
//! radare2 names symbols `sym.imp.puts`, `fcn.00401000`, `obj._obj.foo` and
//! so on. The dots are not valid in C identifiers, so the prefixes are
//! rewritten before parsing. The rewrite is lossy: the original spelling is
//! only kept in [`Sanitized::renamed`] for reporting.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ParserError;

/// Replace a literal identifier prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeRule {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

impl SanitizeRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// The radare2 prefixes, in priority order.
#[must_use]
pub fn default_rules() -> Vec<SanitizeRule> {
    vec![
        SanitizeRule::new("_obj.", "_obj__dot__"),
        SanitizeRule::new("sym.imp.", ""),
        SanitizeRule::new("sym.", ""),
        SanitizeRule::new("fcn.", "fcn__dot__"),
    ]
}

/// Result of sanitizing a source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// Sanitized identifier → original spelling, first occurrence first.
    pub renamed: IndexMap<String, String>,
}

enum Piece {
    Verbatim(Range<usize>),
    Produced { original: String, sanitized: String },
}

/// Single-pass prefix rewriter.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    /// Longest pattern first; ties keep configuration order.
    rules: Vec<SanitizeRule>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::from_valid_rules(default_rules())
    }
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

impl Sanitizer {
    /// Build a sanitizer from configured rules.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::InvalidRule`] if a pattern is empty or does not
    /// start with an identifier character (it could never match), or if a
    /// replacement contains characters that are not valid in an identifier.
    pub fn new(rules: Vec<SanitizeRule>) -> Result<Self, ParserError> {
        for rule in &rules {
            if !rule.pattern.bytes().next().is_some_and(is_ident_start) {
                return Err(ParserError::InvalidRule {
                    pattern: rule.pattern.clone(),
                    reason: "pattern must start with a letter or '_'".to_string(),
                });
            }
            if !rule.replacement.bytes().all(is_ident_byte) {
                return Err(ParserError::InvalidRule {
                    pattern: rule.pattern.clone(),
                    reason: format!("replacement {:?} is not identifier text", rule.replacement),
                });
            }
        }
        Ok(Self::from_valid_rules(rules))
    }

    fn from_valid_rules(mut rules: Vec<SanitizeRule>) -> Self {
        rules.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        Self { rules }
    }

    fn rule_at(&self, rest: &str) -> Option<&SanitizeRule> {
        self.rules.iter().find(|r| rest.starts_with(r.pattern.as_str()))
    }

    /// Rewrite every matching identifier prefix in `input`.
    ///
    /// Patterns only match where an identifier token starts, and may chain
    /// (`sym.imp.fcn.x`). String and character literals and comments are
    /// copied untouched. Two different original spellings never end up as
    /// the same identifier: later ones get `_1`, `_2`, … appended.
    #[must_use]
    pub fn sanitize(&self, input: &str) -> Sanitized {
        let (pieces, plain) = self.scan(input);
        resolve(input, pieces, &plain)
    }

    fn scan(&self, input: &str) -> (Vec<Piece>, HashSet<String>) {
        let bytes = input.as_bytes();
        let mut pieces = Vec::new();
        let mut plain = HashSet::new();
        let mut verbatim_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'"' | b'\'' => i = skip_quoted(bytes, i),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    i = input[i..].find('\n').map_or(bytes.len(), |n| i + n);
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = input[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
                }
                b if b.is_ascii_digit() => {
                    // numeric literals: 0x1f, 1.5e3f
                    while i < bytes.len() && (is_ident_byte(bytes[i]) || bytes[i] == b'.') {
                        i += 1;
                    }
                }
                b if is_ident_start(b) => {
                    let start = i;
                    let mut sanitized = String::new();
                    let mut matched = false;
                    while let Some(rule) = self.rule_at(&input[i..]) {
                        sanitized.push_str(&rule.replacement);
                        i += rule.pattern.len();
                        matched = true;
                    }
                    let tail = i;
                    while i < bytes.len() && is_ident_byte(bytes[i]) {
                        i += 1;
                    }
                    if matched {
                        sanitized.push_str(&input[tail..i]);
                        pieces.push(Piece::Verbatim(verbatim_start..start));
                        pieces.push(Piece::Produced {
                            original: input[start..i].to_string(),
                            sanitized,
                        });
                        verbatim_start = i;
                    } else {
                        plain.insert(input[start..i].to_string());
                    }
                }
                _ => i += 1,
            }
        }
        pieces.push(Piece::Verbatim(verbatim_start..bytes.len()));
        (pieces, plain)
    }
}

/// Index just past the closing quote (or the end of the line if unterminated).
fn skip_quoted(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

fn resolve(input: &str, pieces: Vec<Piece>, plain: &HashSet<String>) -> Sanitized {
    let mut text = String::with_capacity(input.len());
    let mut renamed = IndexMap::new();
    let mut owners: HashSet<String> = HashSet::new();
    let mut assigned: HashMap<String, String> = HashMap::new();

    for piece in pieces {
        match piece {
            Piece::Verbatim(range) => text.push_str(&input[range]),
            Piece::Produced { original, sanitized } => {
                if let Some(name) = assigned.get(&original) {
                    text.push_str(name);
                    continue;
                }
                let sanitized = if sanitized.bytes().next().is_some_and(is_ident_start) {
                    sanitized
                } else {
                    let prefixed = format!("_{sanitized}");
                    tracing::warn!(
                        %original,
                        %prefixed,
                        "sanitized symbol is not an identifier on its own; prefixed"
                    );
                    prefixed
                };
                let mut name = sanitized.clone();
                let mut n = 0usize;
                while plain.contains(&name) || owners.contains(&name) {
                    n += 1;
                    name = format!("{sanitized}_{n}");
                }
                if n > 0 {
                    tracing::warn!(
                        %original,
                        %sanitized,
                        %name,
                        "sanitized symbol collides with another identifier; suffixed"
                    );
                }
                text.push_str(&name);
                owners.insert(name.clone());
                assigned.insert(original.clone(), name.clone());
                renamed.insert(name, original);
            }
        }
    }

    Sanitized { text, renamed }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn sanitize(input: &str) -> String {
        Sanitizer::default().sanitize(input).text
    }

    #[rstest]
    #[case("sym.imp.puts(s);", "puts(s);")]
    #[case("int fcn.00401000(void)", "int fcn__dot__00401000(void)")]
    #[case("x = obj._obj.table;", "x = obj._obj__dot__table;")]
    #[case("sym.imp.fcn.main", "fcn__dot__main")]
    #[case("return sym.arg1 + sym.arg2;", "return arg1 + arg2;")]
    fn default_rules_rewrite_radare2_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn radare2_function_header_and_uses() {
        let out =
            sanitize("int fcn.1000(int sym.arg1){ int var_1; var_1 = sym.arg1; return var_1; }");
        assert_eq!(
            out,
            "int fcn__dot__1000(int arg1){ int var_1; var_1 = arg1; return var_1; }"
        );
    }

    #[test]
    fn patterns_only_match_at_token_start() {
        assert_eq!(sanitize("mysym.field = 1;"), "mysym.field = 1;");
        assert_eq!(sanitize("s.sym.x"), "s.x");
    }

    #[test]
    fn literals_and_comments_are_untouched() {
        let input = "puts(\"sym.imp.x \\\" fcn.1\"); c = 'f'; // sym.y\n/* fcn.2 */ sym.z;";
        assert_eq!(
            sanitize(input),
            "puts(\"sym.imp.x \\\" fcn.1\"); c = 'f'; // sym.y\n/* fcn.2 */ z;"
        );
    }

    #[test]
    fn numbers_are_not_identifier_starts() {
        assert_eq!(sanitize("x = 1.5f + 0x1fcn.3;"), "x = 1.5f + 0x1fcn.3;");
    }

    #[test]
    fn produced_text_is_not_rematched() {
        let rules = vec![SanitizeRule::new("a.", "b_"), SanitizeRule::new("b_", "c")];
        let sanitizer = Sanitizer::new(rules).expect("valid rules");
        assert_eq!(sanitizer.sanitize("a.x").text, "b_x");
    }

    #[test]
    fn collapsed_names_are_disambiguated() {
        let out = Sanitizer::default().sanitize("sym.foo(); sym.imp.foo(); sym.foo();");
        assert_eq!(out.text, "foo(); foo_1(); foo();");
        assert_eq!(out.renamed["foo"], "sym.foo");
        assert_eq!(out.renamed["foo_1"], "sym.imp.foo");
    }

    #[test]
    fn produced_names_avoid_existing_identifiers() {
        let out = Sanitizer::default().sanitize("int len; int foo_1; len = sym.len + sym.imp.len;");
        assert_eq!(out.text, "int len; int foo_1; len = len_1 + len_2;");
    }

    #[test]
    fn prefix_only_and_leading_digit_tokens_stay_identifiers() {
        let out = Sanitizer::default().sanitize("int sym.imp. ; x = sym.1x + fcn.2;");
        assert_eq!(out.text, "int _ ; x = _1x + fcn__dot__2;");
        assert_eq!(out.renamed["_"], "sym.imp.");
        assert_eq!(out.renamed["_1x"], "sym.1x");
    }

    #[test]
    fn rejects_rules_that_cannot_match_or_produce_invalid_text() {
        assert!(matches!(
            Sanitizer::new(vec![SanitizeRule::new("", "x")]),
            Err(ParserError::InvalidRule { .. })
        ));
        assert!(matches!(
            Sanitizer::new(vec![SanitizeRule::new(".x", "")]),
            Err(ParserError::InvalidRule { .. })
        ));
        assert!(matches!(
            Sanitizer::new(vec![SanitizeRule::new("obj.", "obj.")]),
            Err(ParserError::InvalidRule { .. })
        ));
    }

    #[test]
    fn longest_pattern_wins_regardless_of_order() {
        let rules = vec![SanitizeRule::new("sym.", "s_"), SanitizeRule::new("sym.imp.", "i_")];
        let sanitizer = Sanitizer::new(rules).expect("valid rules");
        assert_eq!(sanitizer.sanitize("sym.imp.puts sym.main").text, "i_puts s_main");
    }
}
