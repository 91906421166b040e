//! # lucid-oracle
//!
//! The semantic half of lucid: an [`Oracle`] that summarizes code and
//! proposes names, an Ollama `/api/chat` implementation of it, and the two
//! [`NamingStrategy`](lucid_core::NamingStrategy) implementations that drive
//! it:
//! - [`SequentialStrategy`]: one request per symbol, optional shared history
//! - [`BatchedStrategy`]: one request per function

pub mod client;
pub mod history;
pub mod oracle;
pub mod prompts;
pub mod strategies;

mod error;
mod http;

pub use client::{ClientSettings, OllamaClient};
pub use error::OracleError;
pub use history::{ChatMessage, History, Role};
pub use oracle::{Oracle, Suggestion, parse_batch};
pub use prompts::NameRequest;
pub use strategies::{BatchedStrategy, SequentialStrategy};
