//! Rename substitutions over the parsed unit.
//!
//! The tree is never edited or re-parsed. Each function gets a list of
//! byte-range replacements that the [printer](crate::printer) applies to the
//! original text, which makes every substitution simultaneous.

use std::ops::Range;

use lucid_core::RenameMap;

use crate::extractors::helpers::function_name_node;
use crate::extractors::visit_symbol_names;
use crate::parser::ParsedUnit;

/// Replace `range` of the wrapped source with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub range: Range<usize>,
    pub replacement: String,
}

/// All substitutions for one function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRewrite {
    pub name: String,
    /// Byte range of the whole definition in the wrapped source.
    pub range: Range<usize>,
    /// Non-overlapping, sorted by start offset.
    pub substitutions: Vec<Substitution>,
}

/// Compute the rewrite of every function in `unit`, in definition order.
///
/// A function missing from `renames` is reproduced unchanged. Type names
/// that spell a symbol are substituted too, since a name the function
/// declares cannot also be a type in its scope.
#[must_use]
pub fn rewrite(unit: &ParsedUnit, renames: &RenameMap) -> Vec<FunctionRewrite> {
    let mut rewrites = Vec::new();

    for definition in unit.functions() {
        let Some(name_node) = function_name_node(&definition) else {
            continue;
        };
        let name = name_node.text().to_string();
        let name_range = name_node.range();
        let mut substitutions = Vec::new();

        if let Some(map) = renames.get(&name) {
            visit_symbol_names(&definition, &mut |id| {
                let range = id.range();
                if range == name_range {
                    return;
                }
                let Some(new) = map.get(id.text().as_ref()) else {
                    return;
                };
                if new.as_str() != id.text().as_ref() {
                    substitutions.push(Substitution {
                        range,
                        replacement: new.clone(),
                    });
                }
            });
        } else {
            tracing::debug!(function = %name, "no renames for function");
        }

        tracing::debug!(
            function = %name,
            substitutions = substitutions.len(),
            "rewrite computed"
        );
        rewrites.push(FunctionRewrite {
            name,
            range: definition.range(),
            substitutions,
        });
    }

    rewrites
}
