//! Tests for decoding Telegram updates into bot events.

use linkdrop_social::telegram::{Update, build_keyboard};
use linkdrop_social::{ControlActivation, IncomingMessage, InboundEvent};

fn decode(json: &str) -> Update {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_text_message_becomes_incoming_message() {
    let update = decode(
        r#"{
            "update_id": 123,
            "message": {
                "message_id": 456,
                "from": {"id": 789, "first_name": "Alice", "is_bot": false},
                "chat": {"id": -100123, "type": "group"},
                "date": 1700000000,
                "text": "/start promo"
            }
        }"#,
    );

    assert_eq!(update.update_id, 123);
    assert_eq!(
        update.into_event(),
        Some(InboundEvent::Message(IncomingMessage {
            chat_id: -100123,
            sender_id: 789,
            text: "/start promo".to_string(),
        }))
    );
}

#[test]
fn test_callback_becomes_activation() {
    let update = decode(
        r#"{
            "update_id": 124,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 789, "first_name": "Alice", "is_bot": false},
                "message": {
                    "message_id": 456,
                    "chat": {"id": 555, "type": "private"},
                    "date": 1700000000
                },
                "chat_instance": "-42",
                "data": "promo"
            }
        }"#,
    );

    assert_eq!(
        update.into_event(),
        Some(InboundEvent::Activation(ControlActivation {
            activation_id: "cb-1".to_string(),
            chat_id: 555,
            sender_id: 789,
            token: "promo".to_string(),
        }))
    );
}

#[test]
fn test_callback_without_message_targets_presser() {
    let update = decode(
        r#"{
            "update_id": 125,
            "callback_query": {
                "id": "cb-2",
                "from": {"id": 789, "first_name": "Alice"},
                "inline_message_id": "abc",
                "data": "promo"
            }
        }"#,
    );

    let Some(InboundEvent::Activation(activation)) = update.into_event() else {
        panic!("expected an activation");
    };
    assert_eq!(activation.chat_id, 789);
}

#[test]
fn test_media_message_is_ignored() {
    let update = decode(
        r#"{
            "update_id": 126,
            "message": {
                "message_id": 1,
                "from": {"id": 789, "first_name": "Alice"},
                "chat": {"id": 789, "type": "private"},
                "photo": [{"file_id": "AgAC", "width": 90, "height": 90}]
            }
        }"#,
    );

    assert_eq!(update.into_event(), None);
}

#[test]
fn test_unhandled_update_kind_is_ignored() {
    let update = decode(r#"{"update_id": 127, "edited_message": {"message_id": 1}}"#);
    assert_eq!(update.into_event(), None);
}

#[test]
fn test_keyboard_serializes_single_row() {
    let keyboard = build_keyboard(&[("📹 Send me".to_string(), "promo".to_string())]);
    let value = serde_json::to_value(&keyboard).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "inline_keyboard": [[{"text": "📹 Send me", "callback_data": "promo"}]]
        })
    );
}
