//! # lucid-core
//!
//! Core types and the rename engine shared by every lucid crate:
//! - [`SymbolTable`]: renameable identifiers per function, in declaration order
//! - [`RenameMap`]: the finalized old-name → new-name mapping per function
//! - [`NameScope`]: candidate normalization and per-function uniqueness
//! - [`NamingStrategy`]: the seam where a naming oracle plugs in
//! - [`assign_names`]: drives a strategy over a symbol table, in order

pub mod errors;
pub mod naming;
pub mod rename;
pub mod strategy;
pub mod symbols;

pub use errors::CoreError;
pub use naming::{C_KEYWORDS, NameScope, is_valid_name, normalize_name};
pub use rename::{FunctionRenames, RenameMap};
pub use strategy::{FunctionContext, NamingStrategy, assign_names};
pub use symbols::{FunctionSymbols, Symbol, SymbolRole, SymbolTable, TypeTokens};
