//! The naming-strategy seam and the loop that drives it.
//!
//! A strategy only proposes candidates. Normalization, uniqueness and the
//! order in which symbols are visited belong to [`assign_names`], so swapping
//! strategies never changes how the final names are derived from candidates.

use crate::naming::NameScope;
use crate::rename::{FunctionRenames, RenameMap};
use crate::symbols::{FunctionSymbols, Symbol, SymbolTable};

/// The function currently being named.
#[derive(Debug, Clone, Copy)]
pub struct FunctionContext<'a> {
    pub name: &'a str,
    pub symbols: &'a FunctionSymbols,
}

impl FunctionContext<'_> {
    /// Original text of the function definition.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.symbols.source
    }
}

/// Source of candidate names.
///
/// Implementations swallow their own failures: a candidate of `None` means
/// "keep the original name".
#[async_trait::async_trait]
pub trait NamingStrategy: Send {
    /// Called once per function, before the first [`candidate`](Self::candidate).
    async fn prepare(&mut self, function: &FunctionContext<'_>) {
        let _ = function;
    }

    /// Propose a new name for `symbol`.
    async fn candidate(
        &mut self,
        function: &FunctionContext<'_>,
        symbol: &Symbol<'_>,
    ) -> Option<String>;
}

/// Ask `strategy` for every symbol of every function and build the final,
/// per-function unique rename map.
///
/// Functions are visited in definition order; inside a function arguments
/// come first, then body declarations. Each function starts a fresh
/// [`NameScope`] seeded with the identifiers it references but does not own.
pub async fn assign_names<S: NamingStrategy>(strategy: &mut S, table: &SymbolTable) -> RenameMap {
    let mut map = RenameMap::new();

    for (name, symbols) in table.iter() {
        let function = FunctionContext { name, symbols };
        strategy.prepare(&function).await;

        let mut scope = NameScope::with_reserved(symbols.external_names.iter().cloned());
        let mut renames = FunctionRenames::with_capacity(symbols.len());

        for symbol in symbols.symbols() {
            let candidate = strategy.candidate(&function, &symbol).await;
            let final_name = scope.claim(candidate.as_deref(), symbol.name);
            tracing::debug!(
                function = name,
                original = symbol.name,
                ?candidate,
                %final_name,
                "name assigned"
            );
            renames.insert(symbol.name.to_string(), final_name);
        }

        map.insert(name, renames);
    }

    map
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::symbols::TypeTokens;

    /// Answers from a fixed table; records every call it receives.
    #[derive(Default)]
    struct Scripted {
        answers: HashMap<String, String>,
        calls: Vec<String>,
    }

    impl Scripted {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                answers: pairs
                    .iter()
                    .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
                    .collect(),
                calls: Vec::new(),
            }
        }
    }

    #[async_trait::async_trait]
    impl NamingStrategy for Scripted {
        async fn prepare(&mut self, function: &FunctionContext<'_>) {
            self.calls.push(format!("prepare {}", function.name));
        }

        async fn candidate(
            &mut self,
            function: &FunctionContext<'_>,
            symbol: &Symbol<'_>,
        ) -> Option<String> {
            self.calls.push(format!("{}::{}", function.name, symbol.name));
            self.answers.get(symbol.name).cloned()
        }
    }

    fn int() -> TypeTokens {
        TypeTokens::from_iter(["int"])
    }

    fn example_table() -> SymbolTable {
        let mut f = FunctionSymbols::default();
        f.insert_argument("arg1", int());
        f.insert_variable("var_1", int());
        f.external_names.push("fcn__dot__1000".to_string());
        let mut table = SymbolTable::new();
        table.insert("fcn__dot__1000", f);
        table
    }

    #[tokio::test]
    async fn colliding_candidates_are_suffixed_in_order() {
        let table = example_table();
        let mut strategy = Scripted::new(&[("arg1", "count"), ("var_1", "count")]);

        let map = assign_names(&mut strategy, &table).await;

        let renames = map.get("fcn__dot__1000").expect("function present");
        assert_eq!(renames["arg1"], "count");
        assert_eq!(renames["var_1"], "count_0");
        assert_eq!(map.validate(&table), Ok(()));
    }

    #[tokio::test]
    async fn visits_arguments_then_variables_per_function() {
        let mut first = FunctionSymbols::default();
        first.insert_variable("v", int());
        first.insert_argument("a", int());
        let mut second = FunctionSymbols::default();
        second.insert_argument("b", int());
        let mut table = SymbolTable::new();
        table.insert("first", first);
        table.insert("second", second);

        let mut strategy = Scripted::default();
        let map = assign_names(&mut strategy, &table).await;

        assert_eq!(
            strategy.calls,
            vec!["prepare first", "first::a", "first::v", "prepare second", "second::b"]
        );
        assert_eq!(map.validate(&table), Ok(()));
    }

    #[tokio::test]
    async fn scopes_do_not_leak_between_functions() {
        let mut f = FunctionSymbols::default();
        f.insert_argument("x", int());
        let mut g = FunctionSymbols::default();
        g.insert_argument("y", int());
        let mut table = SymbolTable::new();
        table.insert("f", f);
        table.insert("g", g);

        let mut strategy = Scripted::new(&[("x", "value"), ("y", "value")]);
        let map = assign_names(&mut strategy, &table).await;

        assert_eq!(map.get("f").map(|r| r["x"].as_str()), Some("value"));
        assert_eq!(map.get("g").map(|r| r["y"].as_str()), Some("value"));
    }

    #[tokio::test]
    async fn candidates_cannot_capture_external_names() {
        let mut f = FunctionSymbols::default();
        f.insert_variable("iVar1", int());
        f.external_names.push("strlen".to_string());
        let mut table = SymbolTable::new();
        table.insert("f", f);

        let mut strategy = Scripted::new(&[("iVar1", "strlen")]);
        let map = assign_names(&mut strategy, &table).await;

        assert_eq!(map.get("f").map(|r| r["iVar1"].as_str()), Some("strlen_0"));
    }

    #[tokio::test]
    async fn identical_inputs_give_identical_maps() {
        let table = example_table();
        let answers = [("arg1", "n"), ("var_1", "n")];
        let a = assign_names(&mut Scripted::new(&answers), &table).await;
        let b = assign_names(&mut Scripted::new(&answers), &table).await;
        assert_eq!(a, b);
    }
}
