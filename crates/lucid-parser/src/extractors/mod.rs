//! Symbol-table extraction from a parsed C unit.
//!
//! One walk per `function_definition`: the parameter list gives the
//! arguments, every `declaration` anywhere in the body gives a variable.
//! Block scope is flattened into one namespace per function; a name declared
//! in two blocks is recorded once.
//!
//! The grammar does not know which names are typedefs, so the expression
//! statement `a * b;` parses as a declaration of `b` with type `a`. When `a`
//! is already a symbol of the function, that declaration is an expression and
//! is skipped.

pub(crate) mod helpers;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use ast_grep_core::Node;
use lucid_core::{FunctionSymbols, SymbolTable};

use crate::parser::ParsedUnit;

use helpers::{
    declared_identifier, function_declarator, function_name_node, is_declarator_kind,
    type_tokens, variable_identifier,
};

/// Build the symbol table for every function in `unit`.
#[must_use]
pub fn extract(unit: &ParsedUnit) -> SymbolTable {
    let mut table = SymbolTable::new();
    for definition in unit.functions() {
        let Some(name) = function_name_node(&definition) else {
            continue;
        };
        let name = name.text().to_string();
        let symbols = extract_function(&definition, &name);
        tracing::debug!(
            function = %name,
            arguments = symbols.arguments.len(),
            variables = symbols.variables.len(),
            "extracted symbols"
        );
        table.insert(name, symbols);
    }
    table
}

fn extract_function<D: ast_grep_core::Doc>(definition: &Node<D>, name: &str) -> FunctionSymbols {
    let mut symbols = FunctionSymbols {
        source: definition.text().to_string(),
        ..FunctionSymbols::default()
    };

    if let Some(params) = function_declarator(definition).and_then(|f| f.field("parameters")) {
        collect_parameters(&params, &mut symbols, name);
    }
    if let Some(body) = definition.field("body") {
        collect_declarations(&body, &mut symbols, name);
    }
    symbols.external_names = collect_external_names(definition, &symbols);
    symbols
}

// ── Parameters ─────────────────────────────────────────────────────

fn collect_parameters<D: ast_grep_core::Doc>(
    params: &Node<D>,
    symbols: &mut FunctionSymbols,
    function: &str,
) {
    for param in params.children() {
        if param.kind().as_ref() != "parameter_declaration" {
            continue;
        }
        // `void`, or a type-only parameter
        let Some(id) = param.field("declarator").and_then(|d| declared_identifier(&d)) else {
            continue;
        };
        let name = id.text().to_string();
        let tokens = type_tokens(param.field("type").as_ref());
        if !symbols.insert_argument(name.clone(), tokens) {
            tracing::warn!(function, parameter = %name, "duplicate parameter name");
        }
    }
}

// ── Body declarations ──────────────────────────────────────────────

fn collect_declarations<D: ast_grep_core::Doc>(
    node: &Node<D>,
    symbols: &mut FunctionSymbols,
    function: &str,
) {
    if node.kind().as_ref() == "declaration" && !is_misparsed_expression(node, symbols) {
        let tokens = type_tokens(node.field("type").as_ref());
        for declarator in node.children() {
            if !is_declarator_kind(declarator.kind().as_ref()) {
                continue;
            }
            let Some(id) = variable_identifier(&declarator) else {
                continue;
            };
            let name = id.text().to_string();
            if !symbols.insert_variable(name.clone(), tokens.clone()) {
                tracing::warn!(
                    function,
                    variable = %name,
                    line = id.start_pos().line() + 1,
                    "redeclaration merged into the function scope"
                );
            }
        }
    }
    for child in node.children() {
        collect_declarations(&child, symbols, function);
    }
}

/// `true` for a declaration whose type name is a symbol already in scope.
fn is_misparsed_expression<D: ast_grep_core::Doc>(
    declaration: &Node<D>,
    symbols: &FunctionSymbols,
) -> bool {
    declaration.field("type").is_some_and(|ty| {
        ty.kind().as_ref() == "type_identifier" && symbols.contains(ty.text().as_ref())
    })
}

// ── Everything else ────────────────────────────────────────────────

/// Identifiers and typedef names referenced in the definition that are not
/// symbols, in first-reference order.
///
/// Typedef names are included so that no variable is renamed to a type the
/// function still uses.
fn collect_external_names<D: ast_grep_core::Doc>(
    definition: &Node<D>,
    symbols: &FunctionSymbols,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    visit_kinds(definition, &["identifier", "type_identifier"], &mut |node| {
        let text = node.text().to_string();
        if !symbols.contains(&text) && seen.insert(text.clone()) {
            names.push(text);
        }
    });
    names
}

/// Call `f` on every node below `node` that can spell a symbol, in pre-order.
///
/// That is every `identifier`, plus every `type_identifier` other than a
/// struct, union or enum tag: a symbol used as the left operand of `*` parses
/// as a type name.
pub(crate) fn visit_symbol_names<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
    f: &mut impl FnMut(&Node<'r, D>),
) {
    visit_kinds(node, &["identifier", "type_identifier"], &mut |name| {
        if name.kind().as_ref() == "type_identifier" && is_tag(name) {
            return;
        }
        f(name);
    });
}

fn is_tag<D: ast_grep_core::Doc>(name: &Node<D>) -> bool {
    name.parent().is_some_and(|parent| {
        matches!(
            parent.kind().as_ref(),
            "struct_specifier" | "union_specifier" | "enum_specifier"
        )
    })
}

fn visit_kinds<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
    kinds: &[&str],
    f: &mut impl FnMut(&Node<'r, D>),
) {
    if kinds.contains(&node.kind().as_ref()) {
        f(node);
        return;
    }
    for child in node.children() {
        visit_kinds(&child, kinds, f);
    }
}
