use crate::{BusError, ContextRegistry};

use lexa_core::{ContextId, Envelope, Message};

#[tokio::test]
async fn given_registered_context_when_send_then_envelope_arrives() {
    let registry = ContextRegistry::new();
    let mut inbox = registry.register(ContextId::Content, 8).await;

    registry
        .send_message(ContextId::Content, &Message::ActivateFocusMode)
        .await
        .unwrap();

    let envelope = inbox.recv().await.unwrap();
    assert_eq!(envelope.kind, "ACTIVATE_FOCUS_MODE");
}

#[tokio::test]
async fn given_unregistered_target_when_send_then_unreachable() {
    let registry = ContextRegistry::new();

    let err = registry
        .send_message(ContextId::Popup, &Message::ActivateSimplify)
        .await
        .unwrap_err();

    assert!(matches!(err, BusError::Unreachable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn given_full_inbox_when_send_then_inbox_full() {
    let registry = ContextRegistry::new();
    let _inbox = registry.register(ContextId::Content, 1).await;

    registry
        .send_message(ContextId::Content, &Message::ActivateScreenshot)
        .await
        .unwrap();

    let err = registry
        .send_message(ContextId::Content, &Message::ActivatePrompt)
        .await
        .unwrap_err();

    assert!(matches!(err, BusError::InboxFull { .. }));
}

#[tokio::test]
async fn given_dropped_receiver_when_send_then_context_gone_and_evicted() {
    let registry = ContextRegistry::new();
    let inbox = registry.register(ContextId::SidePanel, 4).await;
    drop(inbox);

    let err = registry
        .send_message(
            ContextId::SidePanel,
            &Message::Log {
                level: "info".into(),
                message: "m".into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BusError::ContextGone { .. }));
    // The stale handle is evicted; the next send reports unreachable.
    assert!(!registry.is_registered(ContextId::SidePanel).await);
}

#[tokio::test]
async fn given_reregistered_context_when_send_then_new_inbox_receives() {
    let registry = ContextRegistry::new();
    let mut old_inbox = registry.register(ContextId::Popup, 4).await;
    let mut new_inbox = registry.register(ContextId::Popup, 4).await;

    registry
        .send_message(ContextId::Popup, &Message::TutorialCompleted { skipped: false })
        .await
        .unwrap();

    let envelope = new_inbox.recv().await.unwrap();
    assert_eq!(envelope.kind, "TUTORIAL_COMPLETED");

    // The superseded inbox closes once its sender is gone.
    assert!(old_inbox.recv().await.is_none());
}

#[tokio::test]
async fn given_unregistered_context_when_unregister_again_then_noop() {
    let registry = ContextRegistry::new();
    let inbox = registry.register(ContextId::Background, 4).await;

    registry.unregister(ContextId::Background).await;
    registry.unregister(ContextId::Background).await;

    drop(inbox);
    assert!(!registry.is_registered(ContextId::Background).await);
}

#[tokio::test]
async fn given_unknown_kind_envelope_when_send_then_delivery_still_succeeds() {
    // The bus transports raw envelopes; recognizing kinds is the
    // consumer's concern.
    let registry = ContextRegistry::new();
    let mut inbox = registry.register(ContextId::Content, 4).await;

    registry
        .send(ContextId::Content, Envelope::raw("UNKNOWN_X", None))
        .await
        .unwrap();

    let envelope = inbox.recv().await.unwrap();
    assert!(envelope.decode().is_err());
}
