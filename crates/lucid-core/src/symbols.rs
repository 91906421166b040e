//! Symbol table types produced by extraction.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Base type words of a declaration, e.g. `["unsigned", "int"]`.
///
/// Order is preserved for prompts; nothing else interprets the tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTokens(Vec<String>);

impl TypeTokens {
    #[must_use]
    pub const fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-joined form used as the oracle's type description.
    #[must_use]
    pub fn describe(&self) -> String {
        self.0.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for TypeTokens {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Whether a symbol came from the parameter list or the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolRole {
    Argument,
    Variable,
}

/// A borrowed view of one renameable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub type_tokens: &'a TypeTokens,
    pub role: SymbolRole,
}

/// Renameable identifiers of a single function definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSymbols {
    /// Named parameters, in parameter-list order.
    pub arguments: IndexMap<String, TypeTokens>,
    /// Body declarations at any nesting depth, in source order.
    pub variables: IndexMap<String, TypeTokens>,
    /// Identifiers referenced in the function that are not renameable
    /// (callees, globals, the function's own name), first reference first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_names: Vec<String>,
    /// Original text of the function definition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl FunctionSymbols {
    /// Record a parameter. Returns `false` if the name was already recorded.
    pub fn insert_argument(&mut self, name: impl Into<String>, type_tokens: TypeTokens) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.arguments.insert(name, type_tokens);
        true
    }

    /// Record a body declaration. Returns `false` if the name was already
    /// recorded (as an argument or an earlier declaration); the first record wins.
    pub fn insert_variable(&mut self, name: impl Into<String>, type_tokens: TypeTokens) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.variables.insert(name, type_tokens);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.arguments.contains_key(name) || self.variables.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len() + self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arguments first, then variables, each in declaration order.
    ///
    /// This is the order in which names are requested and deduplicated.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol<'_>> {
        let args = self.arguments.iter().map(|(name, type_tokens)| Symbol {
            name,
            type_tokens,
            role: SymbolRole::Argument,
        });
        let vars = self.variables.iter().map(|(name, type_tokens)| Symbol {
            name,
            type_tokens,
            role: SymbolRole::Variable,
        });
        args.chain(vars)
    }
}

/// Function name → renameable symbols, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    functions: IndexMap<String, FunctionSymbols>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function. Returns the previous record if the name was taken.
    pub fn insert(
        &mut self,
        function: impl Into<String>,
        symbols: FunctionSymbols,
    ) -> Option<FunctionSymbols> {
        self.functions.insert(function.into(), symbols)
    }

    #[must_use]
    pub fn get(&self, function: &str) -> Option<&FunctionSymbols> {
        self.functions.get(function)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionSymbols)> {
        self.functions.iter().map(|(name, symbols)| (name.as_str(), symbols))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FunctionSymbols)> {
        self.functions
            .iter_mut()
            .map(|(name, symbols)| (name.as_str(), symbols))
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Total number of renameable symbols across all functions.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.functions.values().map(FunctionSymbols::len).sum()
    }
}
