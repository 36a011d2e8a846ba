//! qrassets entrypoint

use clap::Parser;
use qrassets::{AssetGenerator, AssetsConfig, LoggingOptions, Result, logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "qrassets",
    version,
    about = "Generate QR code assets for the investor pitch site"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrassets.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match AssetsConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            // Report configuration errors through the default subscriber.
            let _ = logging::init(&LoggingOptions::default());
            return Err(err);
        }
    };

    if let Err(err) = logging::init(&config.logging) {
        let _ = logging::init(&LoggingOptions::default());
        return Err(err);
    }

    match cli.config.as_deref() {
        Some(path) => tracing::info!("Using configuration file: {}", path.display()),
        None => tracing::debug!("No configuration file given, using built-in defaults"),
    }
    tracing::debug!(url = %config.url, assets = config.assets.len(), "Loaded configuration");

    let generator = AssetGenerator::from_config(&config)?;
    generator.generate().await?;
    Ok(())
}
