use async_trait::async_trait;
use indexmap::IndexMap;
use lucid_core::{FunctionContext, NamingStrategy, Symbol};

use super::{function_history, function_message, request_for};
use crate::history::{ChatMessage, History};
use crate::oracle::Oracle;
use crate::prompts::{self, NameRequest};

/// One oracle call per function, covering all of its symbols.
///
/// The call is made in [`prepare`](NamingStrategy::prepare); candidates are
/// then answered from the returned map. Symbols the model left out keep
/// their original names.
#[derive(Debug)]
pub struct BatchedStrategy<O> {
    oracle: O,
    seed: History,
    names: IndexMap<String, String>,
    transcript: History,
}

impl<O: Oracle> BatchedStrategy<O> {
    pub fn new(oracle: O, seed: History) -> Self {
        Self {
            oracle,
            transcript: seed.clone(),
            seed,
            names: IndexMap::new(),
        }
    }

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
impl<O: Oracle> NamingStrategy for BatchedStrategy<O> {
    async fn prepare(&mut self, function: &FunctionContext<'_>) {
        self.names.clear();
        let requests: Vec<NameRequest> =
            function.symbols.symbols().map(|s| request_for(&s)).collect();
        if requests.is_empty() {
            return;
        }

        let history = function_history(&self.seed, function);
        self.transcript.push(function_message(function));
        match self.oracle.suggest_batch(&history, function.name, &requests).await {
            Ok(names) => {
                let missing = requests.iter().filter(|r| !names.contains_key(&r.name)).count();
                if missing > 0 {
                    tracing::warn!(
                        function = function.name,
                        missing,
                        "oracle batch reply skipped symbols; keeping their original names"
                    );
                }
                self.transcript
                    .push(ChatMessage::user(prompts::batch_prompt(function.name, &requests)));
                self.transcript.push(ChatMessage::assistant(
                    serde_json::json!({ "names": &names }).to_string(),
                ));
                self.names = names;
            }
            Err(e) => {
                tracing::warn!(
                    function = function.name,
                    symbols = requests.len(),
                    error = %e,
                    "oracle batch call failed; keeping original names"
                );
            }
        }
    }

    async fn candidate(
        &mut self,
        _function: &FunctionContext<'_>,
        symbol: &Symbol<'_>,
    ) -> Option<String> {
        self.names.get(symbol.name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use lucid_core::assign_names;
    use pretty_assertions::assert_eq;

    use super::super::fake::{FakeOracle, table};
    use super::*;

    #[tokio::test]
    async fn one_call_per_function_in_extraction_order() {
        let oracle = FakeOracle::new()
            .answer("p", Some("size"))
            .answer("q", Some("size"))
            .answer("r", Some("index"));
        let table = table(&[("f", &["p"], &["q"], &[]), ("g", &[], &["r"], &[])]);
        let mut strategy = BatchedStrategy::new(oracle, History::seeded("code", None));
        let map = assign_names(&mut strategy, &table).await;

        assert_eq!(
            strategy.oracle.batch_calls(),
            vec![vec!["p".to_string(), "q".to_string()], vec!["r".to_string()]]
        );
        assert_eq!(map.get("f").unwrap()["q"], "size_0");
        assert_eq!(map.get("g").unwrap()["r"], "index");
        // seed + body and one exchange per function
        assert_eq!(strategy.transcript().len(), 7);
        let last = strategy.oracle.last_messages();
        assert!(last[0].contains("/* f */"), "got {last:?}");
        assert!(last[1].contains("/* g */"), "got {last:?}");
    }

    #[tokio::test]
    async fn failed_batch_keeps_every_original() {
        let oracle = FakeOracle::new().answer("p", Some("size")).fail_batches();
        let table = table(&[("f", &["p"], &["int"], &[])]);
        let mut strategy = BatchedStrategy::new(oracle, History::seeded("code", None));
        let map = assign_names(&mut strategy, &table).await;

        let f = map.get("f").unwrap();
        assert_eq!(f["p"], "p");
        // originals still go through the keyword scope
        assert_eq!(f["int"], "int_0");
    }

    #[tokio::test]
    async fn omitted_symbols_keep_original_names() {
        let oracle = FakeOracle::new().answer("a", Some("left"));
        let table = table(&[("f", &["a", "b"], &[], &[])]);
        let mut strategy = BatchedStrategy::new(oracle, History::seeded("code", None));
        let map = assign_names(&mut strategy, &table).await;
        assert_eq!(map.get("f").unwrap()["b"], "b");
    }

    #[tokio::test]
    async fn functions_without_symbols_make_no_call() {
        let oracle = FakeOracle::new();
        let table = table(&[("f", &[], &[], &["puts"])]);
        let mut strategy = BatchedStrategy::new(oracle, History::seeded("code", None));
        assign_names(&mut strategy, &table).await;
        assert!(strategy.oracle.batch_calls().is_empty());
    }
}
