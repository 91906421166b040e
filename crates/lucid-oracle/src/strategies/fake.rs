//! Scripted oracle for strategy tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use indexmap::IndexMap;
use lucid_core::{FunctionSymbols, SymbolTable, TypeTokens};

use crate::error::OracleError;
use crate::history::History;
use crate::oracle::{Oracle, Suggestion};
use crate::prompts::NameRequest;

#[derive(Debug, Default)]
pub struct FakeOracle {
    answers: HashMap<String, Option<String>>,
    failing: Vec<String>,
    batch_failing: bool,
    histories: Mutex<Vec<History>>,
    batch_calls: Mutex<Vec<Vec<String>>>,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, name: &str, new_name: Option<&str>) -> Self {
        self.answers.insert(name.to_string(), new_name.map(str::to_string));
        self
    }

    pub fn fail(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    pub const fn fail_batches(mut self) -> Self {
        self.batch_failing = true;
        self
    }

    /// History seen by each `suggest` and `suggest_batch` call.
    pub fn histories(&self) -> Vec<History> {
        self.histories.lock().unwrap().clone()
    }

    /// History length seen by each call.
    pub fn history_lengths(&self) -> Vec<usize> {
        self.histories().iter().map(History::len).collect()
    }

    /// Last message of the history seen by each call.
    pub fn last_messages(&self) -> Vec<String> {
        self.histories()
            .iter()
            .filter_map(|h| h.messages().last().map(|m| m.content.clone()))
            .collect()
    }

    /// Requested names of each `suggest_batch` call.
    pub fn batch_calls(&self) -> Vec<Vec<String>> {
        self.batch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for FakeOracle {
    async fn summarize(&self, _code: &str) -> Result<String, OracleError> {
        Ok("Does something.".to_string())
    }

    async fn suggest(
        &self,
        history: &History,
        request: &NameRequest,
    ) -> Result<Suggestion, OracleError> {
        self.histories.lock().unwrap().push(history.clone());
        if self.failing.contains(&request.name) {
            return Err(OracleError::Parse("scripted failure".to_string()));
        }
        Ok(Suggestion {
            new_name: self.answers.get(&request.name).cloned().flatten(),
            reasoning: None,
        })
    }

    async fn suggest_batch(
        &self,
        history: &History,
        _function: &str,
        requests: &[NameRequest],
    ) -> Result<IndexMap<String, String>, OracleError> {
        self.histories.lock().unwrap().push(history.clone());
        self.batch_calls
            .lock()
            .unwrap()
            .push(requests.iter().map(|r| r.name.clone()).collect());
        if self.batch_failing {
            return Err(OracleError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }
        Ok(requests
            .iter()
            .filter_map(|r| {
                let new = self.answers.get(&r.name).cloned().flatten()?;
                Some((r.name.clone(), new))
            })
            .collect())
    }
}

/// `(function, arguments, variables, external names)`; every symbol is an
/// `int` and each function's source is `/* name */`.
pub fn table(functions: &[(&str, &[&str], &[&str], &[&str])]) -> SymbolTable {
    let mut table = SymbolTable::new();
    for (name, arguments, variables, externals) in functions {
        let mut symbols = FunctionSymbols::default();
        for argument in *arguments {
            symbols.insert_argument(*argument, TypeTokens::from_iter(["int"]));
        }
        for variable in *variables {
            symbols.insert_variable(*variable, TypeTokens::from_iter(["int"]));
        }
        symbols.external_names = externals.iter().map(|s| (*s).to_string()).collect();
        symbols.source = format!("/* {name} */");
        table.insert(*name, symbols);
    }
    table
}
