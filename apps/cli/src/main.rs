use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use dotenv::dotenv;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use shared_config::ClientConfig;
use shared_http::{FileSessionStore, HealHubClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", commands::USAGE);
        return Err(anyhow!("missing command"));
    };

    let config = ClientConfig::from_env();
    if !config.is_configured() {
        return Err(anyhow!("HEALHUB_API_BASE_URL must be set"));
    }
    info!("Using HealHub API at {}", config.api_base_url);

    let store = FileSessionStore::open(&config.session_file)
        .await
        .with_context(|| format!("opening session file {}", config.session_file.display()))?;
    let client = Arc::new(HealHubClient::new(config, Arc::new(store)));

    let response = commands::run(client, command, rest).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

pub(crate) fn export_dir() -> PathBuf {
    env::var("HEALHUB_EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

pub(crate) fn query_from_pairs(pairs: &[String]) -> serde_json::Value {
    let mut params = serde_json::Map::new();
    for pair in pairs {
        if let Some((key, value)) = pair.split_once('=') {
            params.insert(key.to_string(), json!(value));
        }
    }
    serde_json::Value::Object(params)
}
