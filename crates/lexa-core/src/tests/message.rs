use crate::{AccessibilityProfile, CoreError, Message, kinds};

use serde_json::json;

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn given_selection_kind_when_decode_then_carries_text() {
    let msg = Message::decode(
        kinds::TRANSLATE_SELECTION,
        Some(&json!({"text": "bonjour"})),
    )
    .unwrap();

    assert_eq!(
        msg,
        Message::TranslateSelection {
            text: "bonjour".into()
        }
    );
}

#[test]
fn given_activation_kind_when_decode_without_data_then_ok() {
    let msg = Message::decode(kinds::ACTIVATE_FOCUS_MODE, None).unwrap();
    assert_eq!(msg, Message::ActivateFocusMode);
}

#[test]
fn given_apply_profile_with_null_profile_when_decode_then_profile_is_none() {
    let msg = Message::decode(kinds::APPLY_PROFILE, Some(&json!({"profile": null}))).unwrap();
    assert_eq!(msg, Message::ApplyProfile { profile: None });
}

#[test]
fn given_apply_profile_with_mode_when_decode_then_profile_is_some() {
    let msg = Message::decode(kinds::APPLY_PROFILE, Some(&json!({"profile": "dyslexia"}))).unwrap();
    assert_eq!(
        msg,
        Message::ApplyProfile {
            profile: Some(AccessibilityProfile::Dyslexia)
        }
    );
}

#[test]
fn given_unknown_kind_when_decode_then_unknown_kind_error() {
    let err = Message::decode("UNKNOWN_X", None).unwrap_err();

    assert!(err.is_unknown_kind());
    assert!(err.to_string().contains("UNKNOWN_X"));
}

#[test]
fn given_known_kind_with_malformed_data_when_decode_then_invalid_payload_error() {
    let err = Message::decode(kinds::SHOW_INSIGHTS, Some(&json!({"bogus": true}))).unwrap_err();

    assert!(matches!(err, CoreError::InvalidPayload { .. }));
    assert!(!err.is_unknown_kind());
}

// =============================================================================
// Encode Tests
// =============================================================================

#[test]
fn given_log_message_when_payload_then_level_and_message_present() {
    let msg = Message::Log {
        level: "warn".into(),
        message: "content script slow".into(),
    };

    let data = msg.payload().unwrap();
    assert_eq!(data["level"], "warn");
    assert_eq!(data["message"], "content script slow");
}

#[test]
fn given_activation_when_payload_then_none() {
    assert!(Message::ActivateScreenshot.payload().is_none());
    assert!(Message::ActivateVoiceReader.payload().is_none());
}

#[test]
fn given_insights_message_when_encode_decode_then_preserved() {
    let msg = Message::ShowInsights {
        insights: json!({"reading_time_min": 42}),
        session_count: 7,
    };

    let decoded = Message::decode(msg.kind(), msg.payload().as_ref()).unwrap();
    assert_eq!(decoded, msg);
}

#[test]
fn given_every_catalog_kind_when_encode_decode_then_kind_is_stable() {
    let all = vec![
        Message::TranslateSelection { text: "t".into() },
        Message::ProofreadSelection { text: "t".into() },
        Message::SimplifySelection { text: "t".into() },
        Message::ReadAloudSelection { text: "t".into() },
        Message::ActivateScreenshot,
        Message::ActivatePrompt,
        Message::ActivateProofread,
        Message::ActivateSummarize,
        Message::ActivateTranslate,
        Message::ActivateOcrTranslate,
        Message::ActivateSimplify,
        Message::ActivateVoiceReader,
        Message::ActivateFocusMode,
        Message::ApplyProfile {
            profile: Some(AccessibilityProfile::Adhd),
        },
        Message::ShowInsights {
            insights: serde_json::Value::Null,
            session_count: 0,
        },
        Message::Log {
            level: "info".into(),
            message: "m".into(),
        },
        Message::TutorialCompleted { skipped: false },
    ];

    for msg in all {
        let decoded = Message::decode(msg.kind(), msg.payload().as_ref()).unwrap();
        assert_eq!(decoded.kind(), msg.kind());
    }
}
