//! matchline: terminal client for the creator-matching chat service.

mod cli;
mod logging;
mod repl;

use std::sync::Arc;
use std::time::Duration;

use matchline_chat::{ChatClient, ClientOptions, HttpTransport, TransportConfig};
use matchline_common::MatchlineError;
use matchline_config::MatchlineConfig;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "matchline exited with an error");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> matchline_common::Result<()> {
    let (config, fallback) = load_config(&args)?;
    logging::init(args.log_level.as_deref(), &config.logging.level);
    if let Some(reason) = fallback {
        tracing::warn!("using default config: {reason}");
    }

    let client = build_client(&config)?;
    match args.command.unwrap_or_default() {
        Command::Chat => repl::run(&client, config.session.delete_on_exit).await,
        Command::Health => health(&client).await,
    }
}

/// An explicit `--config` must load; the default location falls back to
/// built-in defaults and reports why.
fn load_config(args: &Args) -> Result<(MatchlineConfig, Option<String>), MatchlineError> {
    let (mut config, fallback) = match &args.config {
        Some(path) => (matchline_config::load_config_from(path)?, None),
        None => match matchline_config::load_config() {
            Ok(config) => (config, None),
            Err(e) => {
                let mut config = MatchlineConfig::default();
                matchline_config::toml_loader::apply_env_overrides(&mut config);
                (config, Some(e.to_string()))
            }
        },
    };

    if let Some(url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
        matchline_config::validation::validate(&config)?;
    }
    Ok((config, fallback))
}

fn transport_config(config: &MatchlineConfig) -> TransportConfig {
    TransportConfig::new(&config.api.base_url)
        .with_timeout(Duration::from_secs(config.api.timeout_secs))
        .with_connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
        .with_credentials(config.api.send_credentials)
}

fn client_options(config: &MatchlineConfig) -> ClientOptions {
    ClientOptions {
        api_prefix: config.api.api_prefix.clone(),
        track_terminal_status: config.session.track_terminal_status,
    }
}

fn build_client(config: &MatchlineConfig) -> Result<ChatClient, MatchlineError> {
    let transport =
        HttpTransport::new(transport_config(config)).map_err(|e| MatchlineError::Chat(e.to_string()))?;
    tracing::info!(base_url = %config.api.base_url, "chat service configured");

    Ok(
        ChatClient::new(Arc::new(transport), client_options(config)).with_delete_observer(
            |session_id, err| {
                eprintln!("note: session {session_id} was not deleted ({err})");
            },
        ),
    )
}

async fn health(client: &ChatClient) -> Result<(), MatchlineError> {
    let report = client
        .health()
        .await
        .map_err(|e| MatchlineError::Chat(e.to_string()))?;

    println!("status    {}", report.status);
    if let Some(ts) = &report.timestamp {
        println!("checked   {ts}");
    }
    if let Some(loaded) = report.database_loaded {
        println!("database  {}", if loaded { "loaded" } else { "not loaded" });
    }
    let s = &report.sessions;
    println!(
        "sessions  {} total, {} active, {} closed, {} completed",
        s.total, s.active, s.closed, s.completed
    );

    if report.is_healthy() {
        Ok(())
    } else {
        Err(MatchlineError::Other(format!(
            "service reported status {}",
            report.status
        )))
    }
}
