//! `assignor` — run the EA staffing-recommendation pipeline once.

use assignor_agent::ModelConfig;
use assignor_backend::{BackendConfig, CachedCredentials, CredentialSource, StaticCredentials};
use assignor_pipeline::Pipeline;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The example staffing request run when none is given.
const DEFAULT_REQUEST: &str = "I have an opportunity with motorola for 8h/w for 3 weeks \
in the central timezone. Who are the best EA candidate for assignment?";

#[derive(Parser)]
#[command(name = "assignor", about = "Assignor — EA staffing recommendation pipeline")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "assignor.toml")]
    config: PathBuf,

    /// The staffing request to run through the pipeline
    #[arg(short, long, default_value = DEFAULT_REQUEST)]
    request: String,
}

#[derive(Deserialize)]
struct AssignorConfig {
    model: ModelConfig,
    backend: BackendConfig,
    #[serde(default)]
    credentials: CredentialsConfig,
}

#[derive(Deserialize, Default)]
struct CredentialsConfig {
    /// Bearer token for the question-answering backend. Falls back to the
    /// `ASSIGNOR_BEARER_TOKEN` environment variable when unset.
    #[serde(default)]
    bearer_token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = tokio::fs::read_to_string(&cli.config).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            cli.config.display(),
            e
        )
    })?;
    let mut config: AssignorConfig = toml::from_str(&config_str)?;

    if config.model.api_key.is_empty() {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.model.api_key = key;
        }
    }

    let token = config
        .credentials
        .bearer_token
        .take()
        .or_else(|| std::env::var("ASSIGNOR_BEARER_TOKEN").ok())
        .unwrap_or_default();
    let credentials: Arc<dyn CredentialSource> =
        Arc::new(CachedCredentials::new(StaticCredentials::new(token)));

    let pipeline = Pipeline::with_gemini(config.model, config.backend, credentials)?;

    info!(request = %cli.request, "Running staffing pipeline");
    let run = pipeline.run(&cli.request).await?;

    if run.effort_skipped {
        info!("Effort update was skipped; recommendation used the raw schedule");
    }
    println!("{}", run.recommendation);

    Ok(())
}
