//! The rename pipeline.
//!
//! [`analyze`] is everything that needs no oracle: sanitize, wrap, parse and
//! extract. [`rename`] asks the oracle, enforces uniqueness and prints the
//! rewritten functions. A parse failure therefore always surfaces before the
//! first request is sent.

use anyhow::Context;
use async_trait::async_trait;
use lucid_config::{NamingConfig, NamingMode, SanitizeConfig};
use lucid_core::{FunctionContext, NamingStrategy, RenameMap, Symbol, SymbolTable, assign_names};
use lucid_oracle::{BatchedStrategy, History, Oracle, SequentialStrategy};
use lucid_parser::{
    ParsedUnit, ParserError, SanitizeRule, Sanitized, Sanitizer, WrappedSource, extract, print,
    rewrite,
};

use crate::progress::Progress;

/// A parsed input and its symbol table.
#[derive(Debug)]
pub struct Analysis {
    pub sanitized: Sanitized,
    pub unit: ParsedUnit,
    pub table: SymbolTable,
}

/// Result of a full rename run.
#[derive(Debug)]
pub struct Renamed {
    pub summary: Option<String>,
    pub renames: RenameMap,
    /// The rewritten functions, without any comments.
    pub code: String,
    pub transcript: History,
}

/// Build the sanitizer from configured rules, or the radare2 defaults.
///
/// # Errors
///
/// Returns [`ParserError::InvalidRule`] for a rule that cannot be applied.
pub fn sanitizer_from(config: &SanitizeConfig) -> Result<Sanitizer, ParserError> {
    if config.rules.is_empty() {
        return Ok(Sanitizer::default());
    }
    Sanitizer::new(
        config
            .rules
            .iter()
            .map(|r| SanitizeRule::new(&r.pattern, &r.replacement))
            .collect(),
    )
}

/// Sanitize, wrap, parse and extract `input`.
///
/// # Errors
///
/// Returns [`ParserError`] if the sanitized input does not parse cleanly.
pub fn analyze(input: &str, sanitizer: &Sanitizer) -> Result<Analysis, ParserError> {
    let sanitized = sanitizer.sanitize(input);
    for (name, original) in &sanitized.renamed {
        tracing::debug!(%original, %name, "sanitized");
    }
    tracing::info!(renamed = sanitized.renamed.len(), "sanitize complete");

    let unit = ParsedUnit::parse(WrappedSource::new(&sanitized.text))?;
    let table = extract(&unit);
    tracing::info!(
        functions = table.len(),
        symbols = table.symbol_count(),
        "extraction complete"
    );
    Ok(Analysis {
        sanitized,
        unit,
        table,
    })
}

/// Name every symbol with `oracle` and rewrite the functions.
///
/// # Errors
///
/// Fails only if the assembled rename map breaks its own invariants; oracle
/// failures fall back to original names.
pub async fn rename<O: Oracle>(
    analysis: &Analysis,
    oracle: O,
    naming: &NamingConfig,
) -> anyhow::Result<Renamed> {
    let code = analysis.sanitized.text.as_str();

    let summary = if naming.summary {
        let spinner = Progress::spinner("summarizing");
        let summary = match oracle.summarize(code).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(error = %e, "summary request failed; continuing without");
                None
            }
        };
        spinner.finish_clear();
        summary
    } else {
        None
    };
    let seed = History::seeded(code, summary.as_deref());

    let total = u64::try_from(analysis.table.symbol_count()).unwrap_or(u64::MAX);
    let progress = Progress::bar(total, "naming");
    let (renames, transcript) = match naming.mode {
        NamingMode::Sequential => {
            let strategy = SequentialStrategy::new(oracle, seed, naming.carry_history);
            let mut tracked = Tracked::new(strategy, &progress);
            let renames = assign_names(&mut tracked, &analysis.table).await;
            (renames, tracked.inner.into_transcript())
        }
        NamingMode::Batched => {
            let strategy = BatchedStrategy::new(oracle, seed);
            let mut tracked = Tracked::new(strategy, &progress);
            let renames = assign_names(&mut tracked, &analysis.table).await;
            (renames, tracked.inner.into_transcript())
        }
    };
    progress.finish_clear();
    tracing::info!(mode = %naming.mode, "naming complete");

    renames
        .validate(&analysis.table)
        .context("rename map failed validation")?;

    let rewrites = rewrite(&analysis.unit, &renames);
    let code = print(&analysis.unit, &rewrites);
    tracing::info!(functions = rewrites.len(), "rewrite complete");

    Ok(Renamed {
        summary,
        renames,
        code,
        transcript,
    })
}

/// Final program output: summary comment, one line per symbol, the code.
#[must_use]
pub fn render(renamed: &Renamed) -> String {
    let mut out = String::new();
    if let Some(summary) = &renamed.summary {
        out.push_str(&format!("/* {} */\n", summary.trim().replace("*/", "* /")));
    }
    for (_, renames) in renamed.renames.iter() {
        for (old, new) in renames {
            out.push_str(&format!("/* {old} -> {new} */\n"));
        }
    }
    out.push_str(&renamed.code);
    out.push('\n');
    out
}

/// The symbol table as pretty JSON, without function sources.
///
/// # Errors
///
/// Returns the serializer error; unreachable for well-formed tables.
pub fn symbols_json(table: &SymbolTable) -> serde_json::Result<String> {
    let mut stripped = table.clone();
    for (_, symbols) in stripped.iter_mut() {
        symbols.source.clear();
    }
    serde_json::to_string_pretty(&stripped)
}

/// Advances the progress bar once per symbol.
struct Tracked<'p, S> {
    inner: S,
    progress: &'p Progress,
}

impl<'p, S> Tracked<'p, S> {
    const fn new(inner: S, progress: &'p Progress) -> Self {
        Self { inner, progress }
    }
}

#[async_trait]
impl<'p, S: NamingStrategy> NamingStrategy for Tracked<'p, S> {
    async fn prepare(&mut self, function: &FunctionContext<'_>) {
        self.progress.set_message(function.name);
        self.inner.prepare(function).await;
    }

    async fn candidate(
        &mut self,
        function: &FunctionContext<'_>,
        symbol: &Symbol<'_>,
    ) -> Option<String> {
        let candidate = self.inner.candidate(function, symbol).await;
        self.progress.inc(1);
        candidate
    }
}
