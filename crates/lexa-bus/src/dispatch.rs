use crate::{BusMetrics, ShutdownCoordinator};

use lexa_core::{ContextId, Envelope, Message};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::mpsc;

/// Error type handlers may surface; the pump logs it and keeps running.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A context's message handler.
///
/// Each variant of [`Message`] is dispatched here; matching exhaustively in
/// the implementation is what turns the wire catalog into compile-checked
/// coverage.
#[async_trait]
pub trait MessageHandler: Send {
    fn context(&self) -> ContextId;

    async fn handle(&mut self, message: Message) -> Result<(), HandlerError>;
}

/// Pump a context's inbox until shutdown or channel close.
///
/// Per the messaging contract:
/// - unknown kinds are dropped silently (no-op for the consumer)
/// - malformed payloads of known kinds are logged and dropped
/// - handler errors never terminate the loop; every failure degrades to a
///   log line and the context stays usable
pub async fn run_context<H>(
    mut inbox: mpsc::Receiver<Envelope>,
    mut handler: H,
    shutdown: &ShutdownCoordinator,
    metrics: BusMetrics,
) where
    H: MessageHandler,
{
    let context = handler.context();
    let mut shutdown_rx = shutdown.subscribe();

    info!("Context {context} running");

    loop {
        let envelope = tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Context {context} shutting down");
                break;
            }
            received = inbox.recv() => match received {
                Some(envelope) => envelope,
                None => {
                    info!("Context {context} inbox closed");
                    break;
                }
            },
        };

        let message = match envelope.decode() {
            Ok(message) => message,
            Err(e) if e.is_unknown_kind() => {
                debug!("Context {context} ignoring unknown kind {}", envelope.kind);
                metrics.message_dropped("unknown_kind");
                continue;
            }
            Err(e) => {
                warn!("Context {context} dropping malformed {}: {e}", envelope.kind);
                metrics.message_dropped("invalid_payload");
                continue;
            }
        };

        let kind = message.kind();
        metrics.message_delivered(kind);

        if let Err(e) = handler.handle(message).await {
            warn!("Context {context} handler failed on {kind}: {e}");
        }
    }
}
