//! Name and type helpers for C declarator nodes.

use ast_grep_core::Node;
use lucid_core::TypeTokens;

/// Node kinds that can appear in a declarator position.
const DECLARATOR_KINDS: &[&str] = &[
    "identifier",
    "init_declarator",
    "pointer_declarator",
    "array_declarator",
    "function_declarator",
    "parenthesized_declarator",
    "attributed_declarator",
];

pub(crate) fn is_declarator_kind(kind: &str) -> bool {
    DECLARATOR_KINDS.contains(&kind)
}

/// The next declarator one level down, or `None` at an identifier.
///
/// `parenthesized_declarator` has no `declarator` field, so fall back to the
/// first child that looks like one.
fn inner_declarator<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    if node.kind().as_ref() == "identifier" {
        return None;
    }
    node.field("declarator").or_else(|| {
        node.children()
            .find(|c| is_declarator_kind(c.kind().as_ref()))
    })
}

/// Follow a declarator chain (`*p`, `a[4]`, `x = 1`, `(*cb)(int)`) down to
/// its identifier.
pub(crate) fn declared_identifier<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    let mut current = node.clone();
    loop {
        if current.kind().as_ref() == "identifier" {
            return Some(current);
        }
        current = inner_declarator(&current)?;
    }
}

/// Like [`declared_identifier`], but `None` for a function prototype.
///
/// `int (*cb)(int)` declares the variable `cb`; `int helper(int)` declares a
/// function, recognisable by a `function_declarator` whose own declarator is
/// not parenthesized.
pub(crate) fn variable_identifier<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    let mut current = node.clone();
    loop {
        match current.kind().as_ref() {
            "identifier" => return Some(current),
            "function_declarator" => {
                let inner = inner_declarator(&current)?;
                if inner.kind().as_ref() != "parenthesized_declarator" {
                    return None;
                }
                current = inner;
            }
            _ => current = inner_declarator(&current)?,
        }
    }
}

/// The `function_declarator` that owns the parameter list of a
/// `function_definition`.
///
/// For `int (*get(int a))(int)` that is the innermost one, around `get`.
pub(crate) fn function_declarator<'r, D: ast_grep_core::Doc>(
    definition: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    let mut current = definition.field("declarator")?;
    let mut found = None;
    loop {
        if current.kind().as_ref() == "function_declarator" {
            found = Some(current.clone());
        }
        match inner_declarator(&current) {
            Some(next) => current = next,
            None => return found,
        }
    }
}

/// Identifier node naming a `function_definition`.
pub(crate) fn function_name_node<'r, D: ast_grep_core::Doc>(
    definition: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    definition
        .field("declarator")
        .and_then(|d| declared_identifier(&d))
}

/// Base type words of a declaration's `type` field.
///
/// Pointer, array and qualifier structure lives in the declarator or in
/// sibling nodes and is deliberately not looked at.
pub(crate) fn type_tokens<D: ast_grep_core::Doc>(type_node: Option<&Node<D>>) -> TypeTokens {
    let Some(node) = type_node else {
        return TypeTokens::default();
    };
    match node.kind().as_ref() {
        "primitive_type" | "type_identifier" => TypeTokens::from_iter([node.text().to_string()]),
        "sized_type_specifier" => node.text().split_whitespace().collect(),
        kind @ ("struct_specifier" | "union_specifier" | "enum_specifier") => {
            let keyword = kind.trim_end_matches("_specifier").to_string();
            match node.field("name") {
                Some(name) => TypeTokens::from_iter([keyword, name.text().to_string()]),
                None => TypeTokens::from_iter([keyword]),
            }
        }
        _ => TypeTokens::default(),
    }
}
