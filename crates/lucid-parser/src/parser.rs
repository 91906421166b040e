//! ast-grep wrapper for C translation units.

use std::collections::HashSet;

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};

use crate::error::ParserError;
use crate::extractors::helpers::function_name_node;
use crate::wrapper::WrappedSource;

/// The concrete AST tree type returned by [`parse_source`].
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// A node of an [`AstTree`].
pub type CNode<'r> = Node<'r, StrDoc<SupportLang>>;

/// Parse C source into an ast-grep tree. Never fails: tree-sitter recovers
/// from syntax errors by inserting `ERROR` and missing nodes.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    SupportLang::C.ast_grep(source)
}

/// A wrapped translation unit with its one parse tree.
///
/// Extraction and rewriting both walk this tree, so their traversal orders
/// always agree.
pub struct ParsedUnit {
    wrapped: WrappedSource,
    tree: AstTree,
}

impl std::fmt::Debug for ParsedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedUnit")
            .field("wrapped", &self.wrapped)
            .finish_non_exhaustive()
    }
}

impl ParsedUnit {
    /// Parse a wrapped unit, rejecting anything tree-sitter had to recover from.
    ///
    /// # Errors
    ///
    /// - [`ParserError::ParseFailed`] at the first `ERROR` or missing node
    /// - [`ParserError::NoFunctions`] if there is no function definition
    /// - [`ParserError::DuplicateFunction`] if a function name repeats
    pub fn parse(wrapped: WrappedSource) -> Result<Self, ParserError> {
        let tree = parse_source(wrapped.text());
        let unit = Self { wrapped, tree };
        unit.check_syntax()?;
        unit.check_functions()?;
        tracing::debug!(functions = unit.functions().len(), "parsed translation unit");
        Ok(unit)
    }

    /// Sanitize-free convenience: wrap `body` and parse it.
    ///
    /// # Errors
    ///
    /// See [`ParsedUnit::parse`].
    pub fn parse_body(body: &str) -> Result<Self, ParserError> {
        Self::parse(WrappedSource::new(body))
    }

    /// Full text of the wrapped unit; node ranges index into this.
    #[must_use]
    pub fn source(&self) -> &str {
        self.wrapped.text()
    }

    #[must_use]
    pub fn root(&self) -> CNode<'_> {
        self.tree.root()
    }

    /// Top-level `function_definition` nodes, in source order.
    #[must_use]
    pub fn functions(&self) -> Vec<CNode<'_>> {
        self.root()
            .children()
            .filter(|c| c.kind().as_ref() == "function_definition")
            .collect()
    }

    fn check_syntax(&self) -> Result<(), ParserError> {
        let Some(bad) = first_error(&self.root()) else {
            return Ok(());
        };
        let (line, column) = self.wrapped.body_position(bad.range().start);
        Err(ParserError::ParseFailed {
            line,
            column,
            found: bad.text().to_string(),
        })
    }

    fn check_functions(&self) -> Result<(), ParserError> {
        let functions = self.functions();
        if functions.is_empty() {
            return Err(ParserError::NoFunctions);
        }
        let mut seen = HashSet::new();
        for function in &functions {
            let Some(name) = function_name_node(function) else {
                continue;
            };
            let name = name.text().to_string();
            if !seen.insert(name.clone()) {
                return Err(ParserError::DuplicateFunction(name));
            }
        }
        Ok(())
    }
}

/// First `ERROR` node or zero-width (missing) token, in pre-order.
fn first_error<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    if node.kind().as_ref() == "ERROR" {
        return Some(node.clone());
    }
    let mut has_children = false;
    for child in node.children() {
        has_children = true;
        if let Some(bad) = first_error(&child) {
            return Some(bad);
        }
    }
    let is_root = node.parent().is_none();
    if !has_children && !is_root && node.range().is_empty() {
        return Some(node.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_source_produces_translation_unit() {
        let tree = parse_source("int main(void) { return 0; }");
        assert_eq!(tree.root().kind().as_ref(), "translation_unit");
    }

    #[test]
    fn functions_skip_prelude_typedefs() {
        let unit = ParsedUnit::parse_body("int a(void) { return 1; }\nint b(void) { return 2; }")
            .expect("should parse");
        let names: Vec<_> = unit
            .functions()
            .iter()
            .filter_map(|f| function_name_node(f).map(|n| n.text().to_string()))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn syntax_error_is_fatal_with_body_position() {
        let err = ParsedUnit::parse_body("int f(int a)\n{\n  return a +;\n}").unwrap_err();
        let ParserError::ParseFailed { line, .. } = err else {
            panic!("expected ParseFailed, got {err:?}");
        };
        assert_eq!(line, 3);
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = ParsedUnit::parse_body("int f(void) { return 0 }").unwrap_err();
        assert!(matches!(err, ParserError::ParseFailed { .. }), "got {err:?}");
    }

    #[test]
    fn unsanitized_radare2_names_do_not_parse() {
        let err = ParsedUnit::parse_body("int fcn.1000(int sym.arg1) { return sym.arg1; }");
        assert!(matches!(err, Err(ParserError::ParseFailed { .. })));
    }

    #[test]
    fn input_without_functions_is_rejected() {
        let err = ParsedUnit::parse_body("int global = 3;").unwrap_err();
        assert_eq!(err, ParserError::NoFunctions);
    }

    #[test]
    fn duplicate_definitions_are_rejected() {
        let err = ParsedUnit::parse_body("int f(void) { return 1; }\nint f(void) { return 2; }")
            .unwrap_err();
        assert_eq!(err, ParserError::DuplicateFunction("f".to_string()));
    }

    #[test]
    fn decompiler_typedefs_parse_cleanly() {
        let unit = ParsedUnit::parse_body(
            "undefined4 f(uint param_1, code *cb) { undefined8 uVar1; uVar1 = 0; return (undefined4)uVar1; }",
        );
        assert!(unit.is_ok(), "got {unit:?}");
    }
}
