//! [`NamingStrategy`](lucid_core::NamingStrategy) implementations backed by
//! an [`Oracle`](crate::Oracle).
//!
//! Both strategies turn oracle failures into "keep the original name" and
//! log them; neither ever aborts a run.

mod batched;
mod sequential;

#[cfg(test)]
mod fake;

pub use batched::BatchedStrategy;
pub use sequential::SequentialStrategy;

use lucid_core::{FunctionContext, Symbol};

use crate::history::{ChatMessage, History};
use crate::prompts::{self, NameRequest};

fn request_for(symbol: &Symbol<'_>) -> NameRequest {
    NameRequest::new(symbol.name, symbol.type_tokens.describe(), symbol.role)
}

/// The message that narrows the seed down to `function`'s own body.
fn function_message(function: &FunctionContext<'_>) -> ChatMessage {
    ChatMessage::user(prompts::function_prompt(function.name, function.source()))
}

/// `seed` followed by [`function_message`].
fn function_history(seed: &History, function: &FunctionContext<'_>) -> History {
    let mut history = seed.clone();
    history.push(function_message(function));
    history
}
