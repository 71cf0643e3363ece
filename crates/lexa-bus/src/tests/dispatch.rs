use crate::dispatch::{HandlerError, MessageHandler, run_context};
use crate::{BusMetrics, ContextRegistry, ShutdownCoordinator};

use lexa_core::{ContextId, Envelope, Message};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

/// Handler that records everything it sees and can fail on demand.
struct RecordingHandler {
    context: ContextId,
    seen: Arc<Mutex<Vec<Message>>>,
    fail_on: Option<&'static str>,
}

#[async_trait]
impl MessageHandler for RecordingHandler {
    fn context(&self) -> ContextId {
        self.context
    }

    async fn handle(&mut self, message: Message) -> Result<(), HandlerError> {
        if Some(message.kind()) == self.fail_on {
            return Err("simulated handler failure".into());
        }
        self.seen.lock().await.push(message);
        Ok(())
    }
}

fn recording_handler(
    context: ContextId,
    fail_on: Option<&'static str>,
) -> (RecordingHandler, Arc<Mutex<Vec<Message>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    (
        RecordingHandler {
            context,
            seen: seen.clone(),
            fail_on,
        },
        seen,
    )
}

#[tokio::test]
async fn given_running_context_when_messages_sent_then_handled_in_order() {
    let registry = ContextRegistry::new();
    let shutdown = ShutdownCoordinator::new();
    let inbox = registry.register(ContextId::Content, 8).await;
    let (handler, seen) = recording_handler(ContextId::Content, None);

    let pump = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            run_context(inbox, handler, &shutdown, BusMetrics::new()).await;
        })
    };

    registry
        .send_message(ContextId::Content, &Message::ActivateFocusMode)
        .await
        .unwrap();
    registry
        .send_message(
            ContextId::Content,
            &Message::SimplifySelection { text: "abc".into() },
        )
        .await
        .unwrap();

    // Closing the inbox lets the pump drain everything, then exit.
    registry.unregister(ContextId::Content).await;
    pump.await.unwrap();

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], Message::ActivateFocusMode);
    assert_eq!(
        seen[1],
        Message::SimplifySelection { text: "abc".into() }
    );
}

#[tokio::test]
async fn given_unknown_kind_when_pumped_then_noop_and_loop_survives() {
    let registry = ContextRegistry::new();
    let shutdown = ShutdownCoordinator::new();
    let inbox = registry.register(ContextId::Content, 8).await;
    let (handler, seen) = recording_handler(ContextId::Content, None);

    let pump = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            run_context(inbox, handler, &shutdown, BusMetrics::new()).await;
        })
    };

    // Unknown kind, then malformed payload of a known kind, then a good one.
    registry
        .send(ContextId::Content, Envelope::raw("UNKNOWN_X", None))
        .await
        .unwrap();
    registry
        .send(
            ContextId::Content,
            Envelope::raw("SHOW_INSIGHTS", Some(json!({"wrong": "shape"}))),
        )
        .await
        .unwrap();
    registry
        .send_message(ContextId::Content, &Message::ActivateVoiceReader)
        .await
        .unwrap();

    registry.unregister(ContextId::Content).await;
    pump.await.unwrap();

    // Only the valid message reached the handler; nothing panicked.
    let seen = seen.lock().await;
    assert_eq!(seen.as_slice(), &[Message::ActivateVoiceReader]);
}

#[tokio::test]
async fn given_handler_failure_when_pumped_then_later_messages_still_handled() {
    let registry = ContextRegistry::new();
    let shutdown = ShutdownCoordinator::new();
    let inbox = registry.register(ContextId::Background, 8).await;
    let (handler, seen) = recording_handler(ContextId::Background, Some("LOG"));

    let pump = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            run_context(inbox, handler, &shutdown, BusMetrics::new()).await;
        })
    };

    registry
        .send_message(
            ContextId::Background,
            &Message::Log {
                level: "error".into(),
                message: "boom".into(),
            },
        )
        .await
        .unwrap();
    registry
        .send_message(
            ContextId::Background,
            &Message::TutorialCompleted { skipped: true },
        )
        .await
        .unwrap();

    registry.unregister(ContextId::Background).await;
    pump.await.unwrap();

    let seen = seen.lock().await;
    assert_eq!(seen.as_slice(), &[Message::TutorialCompleted { skipped: true }]);
}

#[tokio::test]
async fn given_closed_inbox_when_pumped_then_loop_exits() {
    let registry = ContextRegistry::new();
    let shutdown = ShutdownCoordinator::new();
    let inbox = registry.register(ContextId::Popup, 4).await;
    let (handler, _seen) = recording_handler(ContextId::Popup, None);

    registry.unregister(ContextId::Popup).await;

    // With the sender gone the pump sees a closed channel and returns.
    run_context(inbox, handler, &shutdown, BusMetrics::new()).await;
}
