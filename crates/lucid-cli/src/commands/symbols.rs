use anyhow::Context;
use lucid_config::LucidConfig;

use crate::cli::SymbolsArgs;
use crate::commands::read_input;
use crate::pipeline;

/// Handle `lucid symbols`: parse and extract only.
pub fn handle(args: &SymbolsArgs) -> anyhow::Result<()> {
    let config = LucidConfig::load_with_dotenv().context("failed to load configuration")?;
    let input = read_input(args.filename.as_deref())?;
    let sanitizer = pipeline::sanitizer_from(&config.sanitize)?;
    let analysis = pipeline::analyze(&input, &sanitizer).context("failed to parse input")?;
    println!("{}", pipeline::symbols_json(&analysis.table)?);
    Ok(())
}
