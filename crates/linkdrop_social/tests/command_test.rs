//! Tests for the text command tokenizer.

use linkdrop_core::MediaKind;
use linkdrop_social::BotCommand;

fn register(slug: &str, handle: &str, kind: MediaKind, caption: &str) -> BotCommand {
    BotCommand::Register {
        slug: slug.to_string(),
        media_handle: handle.to_string(),
        media_kind: kind,
        caption: caption.to_string(),
    }
}

#[test]
fn test_start_without_slug_is_welcome() {
    assert_eq!(BotCommand::parse("/start"), BotCommand::Resolve { slug: None });
    assert_eq!(BotCommand::parse("/start   "), BotCommand::Resolve { slug: None });
}

#[test]
fn test_start_with_slug() {
    assert_eq!(
        BotCommand::parse("/start testvideo1"),
        BotCommand::Resolve {
            slug: Some("testvideo1".to_string())
        }
    );
}

#[test]
fn test_start_addressed_to_bot() {
    assert_eq!(
        BotCommand::parse("/start@sorrybabubot promo"),
        BotCommand::Resolve {
            slug: Some("promo".to_string())
        }
    );
}

#[test]
fn test_add_quoted_caption_is_unquoted() {
    assert_eq!(
        BotCommand::parse(r#"/add promo ABC123 video "New Year Promo""#),
        register("promo", "ABC123", MediaKind::Video, "New Year Promo")
    );
}

#[test]
fn test_add_caption_keeps_inner_whitespace() {
    assert_eq!(
        BotCommand::parse("/add menu DOC9 document Lunch  menu for   March"),
        register("menu", "DOC9", MediaKind::Document, "Lunch  menu for   March")
    );
}

#[test]
fn test_add_unbalanced_quote_kept_verbatim() {
    assert_eq!(
        BotCommand::parse(r#"/add pic P1 photo "half quoted"#),
        register("pic", "P1", MediaKind::Photo, r#""half quoted"#)
    );
}

#[test]
fn test_add_caption_stops_at_line_break() {
    assert_eq!(
        BotCommand::parse("/add pic P1 photo first line\nsecond line"),
        register("pic", "P1", MediaKind::Photo, "first line")
    );
}

#[test]
fn test_add_malformed_is_unrecognized() {
    let inputs = [
        "/add",
        "/add promo",
        "/add promo ABC123",
        "/add promo ABC123 video",
        "/add promo ABC123 audio caption",
        "/add promo ABC123 Video caption",
        "/add promo ABC123 PHOTO caption",
    ];
    for input in inputs {
        assert_eq!(BotCommand::parse(input), BotCommand::Unrecognized, "{input}");
    }
}

#[test]
fn test_simple_commands() {
    assert_eq!(BotCommand::parse("/status"), BotCommand::Status);
    assert_eq!(BotCommand::parse("/help"), BotCommand::Help);
    assert_eq!(BotCommand::parse("  /help  "), BotCommand::Help);
}

#[test]
fn test_other_text_is_unrecognized() {
    for input in ["", "hello", "/starts promo", "start promo", "/unknown", "/STATUS"] {
        assert_eq!(BotCommand::parse(input), BotCommand::Unrecognized, "{input}");
    }
}

#[test]
fn test_privileged_commands() {
    assert!(BotCommand::Status.requires_privilege());
    assert!(register("a", "b", MediaKind::Photo, "c").requires_privilege());
    assert!(!BotCommand::Help.requires_privilege());
    assert!(!BotCommand::Resolve { slug: None }.requires_privilege());
    assert!(!BotCommand::Unrecognized.requires_privilege());
}

#[test]
fn test_add_empty_quoted_caption_kept_verbatim() {
    assert_eq!(
        BotCommand::parse(r#"/add s h video """#),
        register("s", "h", MediaKind::Video, r#""""#)
    );
}
