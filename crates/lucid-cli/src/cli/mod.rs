use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lucid_config::{LucidConfig, NamingMode};

/// Top-level CLI parser for the `lucid` binary.
///
/// Without a subcommand, `lucid` behaves like `lucid rename`.
#[derive(Debug, Parser)]
#[command(
    name = "lucid",
    version,
    about = "Give decompiled C variables meaningful names",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub rename: RenameArgs,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// The command to run, defaulting to `rename` with the top-level args.
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Rename(self.rename))
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Rename the arguments and local variables of every function.
    Rename(RenameArgs),
    /// Print the extracted symbol table as JSON, without contacting the oracle.
    Symbols(SymbolsArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    Sequential,
    Batched,
}

impl From<ModeArg> for NamingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => Self::Sequential,
            ModeArg::Batched => Self::Batched,
        }
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct RenameArgs {
    /// C source to read (defaults to stdin)
    #[arg(long)]
    pub filename: Option<PathBuf>,

    /// Oracle model name
    #[arg(long)]
    pub model: Option<String>,

    /// Oracle base URL
    #[arg(long)]
    pub host: Option<String>,

    /// Naming strategy
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Skip the summary request and the leading summary comment
    #[arg(long)]
    pub no_summary: bool,

    /// Let later questions see earlier answers (sequential mode)
    #[arg(long)]
    pub carry_history: bool,

    /// Write the oracle conversation to this file as JSON
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

impl RenameArgs {
    /// Apply flag overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut LucidConfig) {
        if let Some(model) = &self.model {
            config.oracle.model.clone_from(model);
        }
        if let Some(host) = &self.host {
            config.oracle.host.clone_from(host);
        }
        if let Some(mode) = self.mode {
            config.naming.mode = mode.into();
        }
        if self.no_summary {
            config.naming.summary = false;
        }
        if self.carry_history {
            config.naming.carry_history = true;
        }
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct SymbolsArgs {
    /// C source to read (defaults to stdin)
    #[arg(long)]
    pub filename: Option<PathBuf>,
}
