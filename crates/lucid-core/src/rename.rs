//! Finalized rename maps.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::naming::is_valid_name;
use crate::symbols::SymbolTable;

/// Original identifier → final identifier for one function, in claim order.
pub type FunctionRenames = IndexMap<String, String>;

/// Function name → [`FunctionRenames`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMap {
    functions: IndexMap<String, FunctionRenames>,
}

impl RenameMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, function: impl Into<String>, renames: FunctionRenames) {
        self.functions.insert(function.into(), renames);
    }

    #[must_use]
    pub fn get(&self, function: &str) -> Option<&FunctionRenames> {
        self.functions.get(function)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionRenames)> {
        self.functions.iter().map(|(name, renames)| (name.as_str(), renames))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Check the map against the table it was built from: every symbol has
    /// exactly one entry, final names are valid and distinct per function.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoreError`] found, walking functions and symbols in
    /// declaration order.
    pub fn validate(&self, table: &SymbolTable) -> Result<(), CoreError> {
        for (function, symbols) in table.iter() {
            let renames = self.get(function).ok_or_else(|| CoreError::MissingFunction {
                function: function.to_string(),
            })?;

            for symbol in symbols.symbols() {
                if !renames.contains_key(symbol.name) {
                    return Err(CoreError::MissingSymbol {
                        function: function.to_string(),
                        symbol: symbol.name.to_string(),
                    });
                }
            }

            let mut seen = HashSet::new();
            for (original, name) in renames {
                if !symbols.contains(original) {
                    return Err(CoreError::UnknownSymbol {
                        function: function.to_string(),
                        symbol: original.clone(),
                    });
                }
                if !is_valid_name(name) {
                    return Err(CoreError::InvalidName {
                        function: function.to_string(),
                        name: name.clone(),
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(CoreError::DuplicateName {
                        function: function.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
