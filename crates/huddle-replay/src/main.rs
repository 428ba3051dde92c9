mod cli;
mod replay;
mod script;

use std::io::Read;
use std::process::ExitCode;

use huddle_common::{HuddleError, Result};
use huddle_config::HuddleConfig;
use huddle_stage::{SessionContext, StageConfig};
use tracing_subscriber::EnvFilter;

fn load_config(args: &cli::Args) -> Result<HuddleConfig> {
    match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            let config = huddle_config::toml_loader::load_from_path(path)?;
            huddle_config::validation::validate(&config)?;
            Ok(config)
        }
        None => Ok(huddle_config::load_config().unwrap_or_else(|e| {
            tracing::warn!("Config load failed, using defaults: {e}");
            HuddleConfig::default()
        })),
    }
}

fn read_script(args: &cli::Args) -> Result<String> {
    match &args.script {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            HuddleError::Script(format!("failed to read {}: {e}", path.display()))
        }),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

async fn run(args: cli::Args) -> Result<()> {
    let config = load_config(&args)?;
    let steps = script::parse_script(&read_script(&args)?)?;
    tracing::info!(steps = steps.len(), local = %args.local, "Replaying script");

    let context = SessionContext::new(args.local.into());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    replay::replay(steps, context, StageConfig::from(&config), &mut out).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("huddle=info");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("huddle-replay v{} starting...", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("huddle-replay: {e}");
            ExitCode::FAILURE
        }
    }
}
