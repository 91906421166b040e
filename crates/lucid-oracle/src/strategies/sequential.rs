use async_trait::async_trait;
use lucid_core::{FunctionContext, NamingStrategy, Symbol};

use super::{function_message, request_for};
use crate::history::{ChatMessage, History};
use crate::oracle::Oracle;
use crate::prompts;

/// One oracle call per symbol, in extraction order.
///
/// Every question is asked on top of the seed history plus the body of the
/// function being named. With `carry_history`, each question and answer is
/// appended for the rest of the function, so later names can build on
/// earlier ones.
#[derive(Debug)]
pub struct SequentialStrategy<O> {
    oracle: O,
    seed: History,
    history: History,
    carry_history: bool,
    transcript: History,
}

impl<O: Oracle> SequentialStrategy<O> {
    pub fn new(oracle: O, seed: History, carry_history: bool) -> Self {
        Self {
            oracle,
            history: seed.clone(),
            transcript: seed.clone(),
            seed,
            carry_history,
        }
    }

    /// Everything exchanged so far: the seed, then per function its body and
    /// each question and answer.
    #[must_use]
    pub const fn transcript(&self) -> &History {
        &self.transcript
    }

    #[must_use]
    pub fn into_transcript(self) -> History {
        self.transcript
    }
}

#[async_trait]
impl<O: Oracle> NamingStrategy for SequentialStrategy<O> {
    async fn prepare(&mut self, function: &FunctionContext<'_>) {
        tracing::debug!(
            function = function.name,
            symbols = function.symbols.len(),
            "naming function"
        );
        self.history = self.seed.clone();
        if function.symbols.is_empty() {
            return;
        }
        let message = function_message(function);
        self.history.push(message.clone());
        self.transcript.push(message);
    }

    async fn candidate(
        &mut self,
        function: &FunctionContext<'_>,
        symbol: &Symbol<'_>,
    ) -> Option<String> {
        let request = request_for(symbol);
        let suggestion = match self.oracle.suggest(&self.history, &request).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                tracing::warn!(
                    function = function.name,
                    symbol = symbol.name,
                    error = %e,
                    "oracle call failed; keeping original name"
                );
                return None;
            }
        };

        if suggestion.new_name.is_none() {
            tracing::warn!(
                function = function.name,
                symbol = symbol.name,
                "oracle reply has no new_name; keeping original name"
            );
        }
        if let Some(reasoning) = &suggestion.reasoning {
            tracing::debug!(symbol = symbol.name, %reasoning, "oracle reasoning");
        }

        let question = ChatMessage::user(prompts::new_name_prompt(&request));
        let answer = ChatMessage::assistant(serde_json::to_string(&suggestion).unwrap_or_default());
        if self.carry_history {
            self.history.push(question.clone());
            self.history.push(answer.clone());
        }
        self.transcript.push(question);
        self.transcript.push(answer);

        suggestion.new_name
    }
}
