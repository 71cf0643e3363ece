//! lexa - reading-assistance agent
//!
//! Hosts the assistant's execution contexts and exposes the backend flows
//! on the command line.
//!
//! # Examples
//!
//! ```bash
//! # Run the agent until interrupted
//! lexa run
//!
//! # Check backend readiness
//! lexa health --wait 30
//!
//! # Select a profile
//! lexa profile set dyslexia
//! ```

use lexa_agent::agent::{Agent, timeouts_from};
use lexa_agent::cli::{Cli, Commands, ProfileCommands};
use lexa_agent::contexts::PopupContext;
use lexa_agent::error::Result as AgentResult;
use lexa_agent::logger;

use lexa_bus::{ContextRegistry, ShutdownCoordinator};
use lexa_client::BackendClient;
use lexa_config::Config;
use lexa_core::{ANONYMOUS_USER_ID, AccessibilityProfile};
use lexa_store::Store;
use lexa_sync::ProfileSynchronizer;

use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::error;
use serde_json::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.backend.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logger(&config) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Run => {
            config.log_summary();
            Agent::run(config).await
        }
        command => run_command(command, &config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load, override, validate.
fn load_config(backend_override: Option<&str>) -> AgentResult<Config> {
    let mut config = Config::load()?;
    if let Some(backend) = backend_override {
        config.backend.base_url = backend.to_string();
    }
    config.validate()?;
    Ok(config)
}

fn init_logger(config: &Config) -> AgentResult<()> {
    let log_file = match &config.logging.file {
        Some(file) => Some(Config::config_dir()?.join(file)),
        None => None,
    };

    logger::initialize(config.logging.level, log_file, config.logging.colored)
}

/// One-shot commands share the agent's storage and client but skip the
/// context pumps; profile broadcasts just miss their closed targets.
async fn run_command(command: Commands, config: &Config) -> AgentResult<()> {
    let (store, _report) = Store::open(config.storage_path()?)?;
    let store = Arc::new(store);
    let client = Arc::new(BackendClient::new(
        &config.backend.base_url,
        timeouts_from(config),
    ));
    let sync = Arc::new(ProfileSynchronizer::new(store.clone(), client.clone()));
    let popup = PopupContext::new(
        store.clone(),
        client.clone(),
        sync.clone(),
        ContextRegistry::new(),
    );

    match command {
        // Handled before dispatch; listed to keep the match exhaustive.
        Commands::Run => Ok(()),

        Commands::Health { wait } => {
            let report = match wait {
                Some(secs) => {
                    let shutdown = ShutdownCoordinator::new();
                    let mut shutdown_rx = shutdown.subscribe();
                    client
                        .wait_ready(Duration::from_secs(secs), &mut shutdown_rx)
                        .await?
                }
                None => client.health().await?,
            };

            print_json(&json!({
                "readiness": report.readiness.as_str(),
                "gemini_enabled": report.gemini_enabled,
                "mongodb_enabled": report.mongodb_enabled,
                "latency_ms": report.latency_ms,
                "status": report.status,
            }));
            Ok(())
        }

        Commands::Login { email, password } => {
            println!("{}", popup.sign_in(&email, &password).await);
            Ok(())
        }

        Commands::Register { email, password } => {
            println!("{}", popup.sign_up(&email, &password).await);
            Ok(())
        }

        Commands::Logout => {
            println!("{}", popup.sign_out().await);
            Ok(())
        }

        Commands::Profile { action } => match action {
            ProfileCommands::Set { mode } => {
                let profile = AccessibilityProfile::from_str(&mode)?;
                println!("{}", popup.select_profile(Some(profile)).await);
                Ok(())
            }
            ProfileCommands::Get => {
                let user_id = active_user(&store).await;
                let profile = sync.load(&user_id).await?;
                print_json(&json!({
                    "userId": user_id,
                    "profile": profile.map(|p| p.as_str()),
                }));
                Ok(())
            }
            ProfileCommands::Clear => {
                println!("{}", popup.select_profile(None).await);
                Ok(())
            }
        },

        Commands::Insights => {
            let user_id = active_user(&store).await;
            let report = client.insights(&user_id).await?;
            print_json(&json!({
                "userId": user_id,
                "insights": report.insights,
                "session_count": report.session_count,
            }));
            Ok(())
        }
    }
}

async fn active_user(store: &Store) -> String {
    store
        .user_id()
        .await
        .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string())
}

fn print_json(value: &serde_json::Value) {
    // Serializing a Value cannot fail.
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("JSON value serialization")
    );
}
