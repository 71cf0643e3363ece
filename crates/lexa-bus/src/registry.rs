use crate::{BusError, BusMetrics, Result as BusResult};

use lexa_core::{ContextId, Envelope, Message};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use tokio::sync::{RwLock, mpsc};

/// Registry for routing messages between execution contexts.
///
/// Delivery is fire-and-forget: a send either lands in the destination
/// inbox or fails immediately; there is no queueing for contexts that have
/// not registered yet.
#[derive(Clone)]
pub struct ContextRegistry {
    inner: Arc<RwLock<HashMap<ContextId, ContextHandle>>>,
    metrics: BusMetrics,
}

#[derive(Clone)]
struct ContextHandle {
    sender: mpsc::Sender<Envelope>,
    registered_at: DateTime<Utc>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            metrics: BusMetrics::new(),
        }
    }

    /// Register a context and get its inbox receiver.
    ///
    /// Re-registering replaces the stale handle: a reopened popup supersedes
    /// the previous one, whose inbox drains and closes.
    pub async fn register(&self, context: ContextId, capacity: usize) -> mpsc::Receiver<Envelope> {
        let (sender, receiver) = mpsc::channel(capacity);

        let mut inner = self.inner.write().await;
        let previous = inner.insert(
            context,
            ContextHandle {
                sender,
                registered_at: Utc::now(),
            },
        );

        if previous.is_some() {
            warn!("Context {context} re-registered, replacing stale handle");
        } else {
            info!("Registered context {context} ({} total)", inner.len());
        }
        self.metrics.context_registered(context);

        receiver
    }

    /// Unregister a context
    pub async fn unregister(&self, context: ContextId) {
        let mut inner = self.inner.write().await;

        if inner.remove(&context).is_some() {
            info!(
                "Unregistered context {context} ({} total remaining)",
                inner.len()
            );
            self.metrics.context_unregistered(context);
        }
    }

    pub async fn is_registered(&self, context: ContextId) -> bool {
        self.inner.read().await.contains_key(&context)
    }

    /// How long the context has been registered, if it is.
    pub async fn registered_at(&self, context: ContextId) -> Option<DateTime<Utc>> {
        self.inner.read().await.get(&context).map(|h| h.registered_at)
    }

    /// Deliver an envelope to a context's inbox.
    ///
    /// Single attempt, no ordering guarantee across kinds. Callers that
    /// need the activation retry wrap this in [`crate::with_retry`].
    pub async fn send(&self, target: ContextId, envelope: Envelope) -> BusResult<()> {
        let handle = {
            let inner = self.inner.read().await;
            match inner.get(&target) {
                Some(handle) => handle.clone(),
                None => return Err(BusError::unreachable(target)),
            }
        };

        let kind = envelope.kind.clone();
        match handle.sender.try_send(envelope) {
            Ok(()) => {
                self.metrics.message_sent(&kind);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("Inbox full for {target}, dropping {kind}");
                self.metrics.message_dropped("inbox_full");
                Err(BusError::inbox_full(target))
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                // The receiver loop ended without unregistering; evict.
                warn!("Context {target} inbox closed, evicting handle");
                self.unregister(target).await;
                self.metrics.message_dropped("context_gone");
                Err(BusError::context_gone(target))
            }
        }
    }

    /// Encode and deliver a typed message.
    pub async fn send_message(&self, target: ContextId, message: &Message) -> BusResult<()> {
        self.send(target, Envelope::from(message)).await
    }

    pub fn metrics(&self) -> &BusMetrics {
        &self.metrics
    }
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}
