//! Source regeneration from computed rewrites.

use crate::parser::ParsedUnit;
use crate::rewrite::FunctionRewrite;

/// Print every rewritten function, joined by a blank line.
///
/// Prelude typedefs and other top-level content are not printed. Text
/// between substitutions is copied byte for byte.
#[must_use]
pub fn print(unit: &ParsedUnit, rewrites: &[FunctionRewrite]) -> String {
    rewrites
        .iter()
        .map(|rewrite| print_function(unit.source(), rewrite))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn print_function(source: &str, rewrite: &FunctionRewrite) -> String {
    let mut out = String::with_capacity(rewrite.range.len());
    let mut cursor = rewrite.range.start;
    for sub in &rewrite.substitutions {
        out.push_str(&source[cursor..sub.range.start]);
        out.push_str(&sub.replacement);
        cursor = sub.range.end;
    }
    out.push_str(&source[cursor..rewrite.range.end]);
    out
}
