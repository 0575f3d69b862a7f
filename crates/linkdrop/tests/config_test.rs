//! Tests for layered configuration loading.

use linkdrop::{DEFAULT_ADMIN_ID, LinkdropConfig, OperatingMode};
use linkdrop_core::MediaKind;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults_with_token_only() {
    let config = LinkdropConfig::from_sources("", env(&[("BOT_TOKEN", "123:abc")])).unwrap();

    assert_eq!(config.bot_token(), "123:abc");
    assert_eq!(*config.admin_id(), DEFAULT_ADMIN_ID);
    assert_eq!(*config.environment(), OperatingMode::Polling);
    assert_eq!(*config.port(), 3000);
    assert_eq!(*config.poll_timeout(), 30);
    assert!(config.database_url().is_none());
    assert!(config.bot_username().is_none());
    assert!(config.seed().is_empty());
}

#[test]
fn test_missing_token_is_rejected() {
    let err = LinkdropConfig::from_sources("port = 8080", HashMap::new()).unwrap_err();
    assert!(err.to_string().contains("BOT_TOKEN is required"));
}

#[test]
fn test_blank_token_is_rejected() {
    assert!(LinkdropConfig::from_sources("", env(&[("BOT_TOKEN", "  ")])).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let toml = r#"
        bot_token = "from-file:token"
        port = 8080
        admin_id = 1
    "#;
    let config = LinkdropConfig::from_sources(
        toml,
        env(&[("PORT", "9090"), ("ADMIN_ID", "777"), ("BOT_USERNAME", "sorrybabubot")]),
    )
    .unwrap();

    assert_eq!(config.bot_token(), "from-file:token");
    assert_eq!(*config.port(), 9090);
    assert_eq!(*config.admin_id(), 777);
    assert_eq!(config.bot_username().as_deref(), Some("sorrybabubot"));
}

#[test]
fn test_webhook_mode_requires_url() {
    let err = LinkdropConfig::from_sources(
        "",
        env(&[("BOT_TOKEN", "123:abc"), ("ENVIRONMENT", "webhook")]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("WEBHOOK_URL"));
}

#[test]
fn test_webhook_endpoint_appends_token() {
    let config = LinkdropConfig::from_sources(
        "",
        env(&[
            ("BOT_TOKEN", "123:abc"),
            ("ENVIRONMENT", "webhook"),
            ("WEBHOOK_URL", "https://bot.example.com/"),
        ]),
    )
    .unwrap();

    assert_eq!(*config.environment(), OperatingMode::Webhook);
    assert_eq!(
        config.webhook_endpoint().as_deref(),
        Some("https://bot.example.com/123:abc")
    );
}

#[test]
fn test_unknown_mode_is_rejected() {
    let result = LinkdropConfig::from_sources(
        "",
        env(&[("BOT_TOKEN", "123:abc"), ("ENVIRONMENT", "carrier-pigeon")]),
    );
    assert!(result.is_err());
}

#[test]
fn test_seed_entries_from_file() {
    let toml = r#"
        bot_token = "123:abc"

        [[seed]]
        slug = "testvideo1"
        media_handle = "BAACAgUAAxkB"
        media_kind = "video"
        caption = "Id:2001"

        [[seed]]
        slug = "menu"
        media_handle = "DOC9"
        media_kind = "document"
    "#;
    let config = LinkdropConfig::from_sources(toml, HashMap::new()).unwrap();

    let seed = config.seed();
    assert_eq!(seed.len(), 2);
    assert_eq!(seed[0].slug, "testvideo1");
    assert_eq!(seed[0].media_kind, MediaKind::Video);
    assert_eq!(seed[0].caption.as_deref(), Some("Id:2001"));
    assert_eq!(seed[1].media_kind, MediaKind::Document);
    assert!(seed[1].caption.is_none());
}

#[test]
fn test_seed_with_unknown_kind_is_rejected() {
    let toml = r#"
        bot_token = "123:abc"

        [[seed]]
        slug = "clip"
        media_handle = "A1"
        media_kind = "audio"
    "#;
    assert!(LinkdropConfig::from_sources(toml, HashMap::new()).is_err());
}
