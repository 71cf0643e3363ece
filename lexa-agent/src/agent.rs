//! Wires the four contexts to the bus and runs them until signalled.

use crate::contexts::{BackgroundContext, ContentContext, PopupContext, SidePanelContext};
use crate::error::Result as AgentResult;

use lexa_bus::dispatch::{MessageHandler, run_context};
use lexa_bus::{ContextRegistry, RetryPolicy, ShutdownCoordinator};
use lexa_client::{BackendClient, Timeouts};
use lexa_config::Config;
use lexa_core::ANONYMOUS_USER_ID;
use lexa_store::Store;
use lexa_sync::ProfileSynchronizer;

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::task::JoinHandle;

pub struct Agent;

impl Agent {
    /// Host the contexts until a shutdown signal arrives.
    pub async fn run(config: Config) -> AgentResult<()> {
        let (store, open_report) = Store::open(config.storage_path()?)?;
        if let Some(err) = &open_report.corruption_error {
            warn!("Recovered from corrupted storage document: {err}");
        }
        let store = Arc::new(store);

        let client = Arc::new(BackendClient::new(
            &config.backend.base_url,
            timeouts_from(&config),
        ));
        let sync = Arc::new(ProfileSynchronizer::new(store.clone(), client.clone()));

        let registry = ContextRegistry::new();
        let shutdown = ShutdownCoordinator::new();
        let retry = RetryPolicy::fixed(
            config.retry.max_attempts,
            Duration::from_millis(config.retry.delay_ms),
        );

        let background = BackgroundContext::new(
            registry.clone(),
            store.clone(),
            client.clone(),
            shutdown.clone(),
            retry,
        );
        let content = ContentContext::new(registry.clone(), store.settings().await);
        let popup = PopupContext::new(
            store.clone(),
            client.clone(),
            sync.clone(),
            registry.clone(),
        );
        let side_panel = SidePanelContext::new(registry.clone());

        let capacity = config.bus.inbox_capacity;
        let tasks = vec![
            spawn_context(&registry, &shutdown, capacity, background.clone()).await,
            spawn_context(&registry, &shutdown, capacity, content).await,
            spawn_context(&registry, &shutdown, capacity, popup).await,
            spawn_context(&registry, &shutdown, capacity, side_panel).await,
        ];

        // Startup probe: degraded is worth a warning, never a refusal.
        match client.health().await {
            Ok(report) => info!(
                "Backend {} (gemini: {}, mongodb: {}, {}ms)",
                report.readiness, report.gemini_enabled, report.mongodb_enabled, report.latency_ms
            ),
            Err(e) => warn!("Backend unreachable at startup: {e}"),
        }

        // Re-apply the stored profile so a restarted session looks the same.
        let user_id = store
            .user_id()
            .await
            .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string());
        if let Some(profile) = sync.load(&user_id).await? {
            info!("Restoring {profile} profile from previous session");
            background.broadcast_profile(Some(profile)).await;
        }

        if !store.tutorial_completed().await {
            info!("First run: tutorial not completed yet");
        }

        install_signal_handlers(&shutdown);

        // Block until the coordinator fires, then drain the context pumps.
        let mut shutdown_rx = shutdown.subscribe();
        let _ = shutdown_rx.recv().await;

        for task in tasks {
            if let Err(e) = task.await {
                error!("Context task panicked: {e}");
            }
        }

        info!("Agent stopped");
        Ok(())
    }
}

/// Build per-endpoint deadlines from config.
pub fn timeouts_from(config: &Config) -> Timeouts {
    Timeouts {
        health: Duration::from_millis(config.backend.health_timeout_ms),
        insights: Duration::from_millis(config.backend.insights_timeout_ms),
        request: Duration::from_millis(config.backend.request_timeout_ms),
    }
}

async fn spawn_context<H>(
    registry: &ContextRegistry,
    shutdown: &ShutdownCoordinator,
    capacity: usize,
    handler: H,
) -> JoinHandle<()>
where
    H: MessageHandler + 'static,
{
    let inbox = registry.register(handler.context(), capacity).await;
    let shutdown = shutdown.clone();
    let metrics = registry.metrics().clone();

    tokio::spawn(async move {
        run_context(inbox, handler, &shutdown, metrics).await;
    })
}

#[cfg(unix)]
fn install_signal_handlers(shutdown: &ShutdownCoordinator) {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let shutdown = shutdown.clone();
    std::thread::spawn(move || {
        let mut signals = match Signals::new([SIGINT, SIGTERM]) {
            Ok(signals) => signals,
            Err(e) => {
                error!("Failed to register signal handlers: {e}");
                return;
            }
        };

        if let Some(sig) = signals.forever().next() {
            info!("Received signal {sig}, shutting down...");
            shutdown.shutdown();
        }
    });
}

#[cfg(not(unix))]
fn install_signal_handlers(shutdown: &ShutdownCoordinator) {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received ctrl-c, shutting down...");
            shutdown.shutdown();
        }
    });
}
