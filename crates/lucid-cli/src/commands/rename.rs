use std::time::Duration;

use anyhow::Context;
use lucid_config::LucidConfig;
use lucid_oracle::{ClientSettings, OllamaClient};

use crate::cli::RenameArgs;
use crate::commands::read_input;
use crate::pipeline;

/// Handle `lucid rename` (and bare `lucid`).
pub async fn handle(args: &RenameArgs) -> anyhow::Result<()> {
    let mut config = LucidConfig::load_with_dotenv().context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let input = read_input(args.filename.as_deref())?;
    let sanitizer = pipeline::sanitizer_from(&config.sanitize)?;
    let analysis = pipeline::analyze(&input, &sanitizer).context("failed to parse input")?;

    let oracle = OllamaClient::new(ClientSettings {
        host: config.oracle.host.clone(),
        model: config.oracle.model.clone(),
        timeout: Duration::from_secs(config.oracle.timeout_secs),
        temperature: config.oracle.temperature,
    })
    .context("failed to build oracle client")?;
    tracing::info!(host = %config.oracle.host, model = %config.oracle.model, "oracle ready");

    let renamed = pipeline::rename(&analysis, oracle, &config.naming).await?;

    if let Some(path) = &args.transcript {
        let json = serde_json::to_string_pretty(&renamed.transcript)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
    }

    print!("{}", pipeline::render(&renamed));
    Ok(())
}
