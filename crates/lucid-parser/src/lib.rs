//! # lucid-parser
//!
//! Structural half of the lucid rename pipeline, built on ast-grep's
//! tree-sitter C grammar:
//!
//! 1. [`Sanitizer`] rewrites radare2-style names (`sym.imp.puts`) into C tokens
//! 2. [`WrappedSource`] prepends stub typedefs for decompiler types
//! 3. [`ParsedUnit`] parses once and rejects anything tree-sitter had to recover from
//! 4. [`extract`] builds the [`SymbolTable`](lucid_core::SymbolTable)
//! 5. [`rewrite`] turns a [`RenameMap`](lucid_core::RenameMap) into byte-range substitutions
//! 6. [`print`] regenerates the functions

pub mod error;
pub mod extractors;
pub mod parser;
pub mod printer;
pub mod rewrite;
pub mod sanitize;
pub mod wrapper;

pub use error::ParserError;
pub use extractors::extract;
pub use parser::{AstTree, CNode, ParsedUnit, parse_source};
pub use printer::print;
pub use rewrite::{FunctionRewrite, Substitution, rewrite};
pub use sanitize::{SanitizeRule, Sanitized, Sanitizer, default_rules};
pub use wrapper::{PRELUDE, WrappedSource};
