//! Raw HTTP calls to the Telegram Bot API.
//!
//! Wraps reqwest for the message, media, callback and webhook methods
//! linkdrop needs. Every call goes through one JSON POST helper that unwraps
//! the `{ok, description, result}` envelope.

use super::types::{ApiResponse, InlineKeyboardButton, InlineKeyboardMarkup, Update, User};
use crate::{ChatTransport, ConfirmationControl, TextFormat, TransportResult};
use async_trait::async_trait;
use linkdrop_error::{TransportError, TransportErrorKind};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

/// Telegram's public Bot API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Low-level Telegram Bot API client.
///
/// The bot token is embedded in the request URL, so the URL itself is never
/// logged.
pub struct TelegramApi {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramApi").finish_non_exhaustive()
    }
}

impl TelegramApi {
    /// Create a new API client for the given bot token.
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url(bot_token, DEFAULT_BASE_URL)
    }

    /// Create a new API client with a custom base URL.
    pub fn with_base_url(bot_token: &str, base_url: &str) -> Self {
        debug!(token_len = bot_token.len(), "Creating Telegram API client");
        Self {
            client: Client::new(),
            base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), bot_token),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> TransportResult<T> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await?;

        let api_response: ApiResponse<T> = response.json().await?;
        if !api_response.ok {
            let description = api_response.description.unwrap_or_default();
            warn!(method, description, "Telegram API call failed");
            return Err(TransportError::new(TransportErrorKind::Api(description)));
        }

        api_response.result.ok_or_else(|| {
            TransportError::new(TransportErrorKind::Serialization(format!(
                "{method} returned ok without a result"
            )))
        })
    }

    /// Identity of the bot this token belongs to.
    pub async fn get_me(&self) -> TransportResult<User> {
        self.call("getMe", &json!({})).await
    }

    /// Long-poll for new updates.
    ///
    /// `offset` should be `last_update_id + 1` to acknowledge previously
    /// received updates.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: u64,
    ) -> TransportResult<Vec<Update>> {
        let mut body = json!({
            "timeout": timeout,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }

        self.call("getUpdates", &body).await
    }

    /// Send a text message, optionally with HTML parse mode and a keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> TransportResult<()> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(mode) = parse_mode {
            body["parse_mode"] = json!(mode);
        }
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }

        self.call::<Value>("sendMessage", &body).await?;
        Ok(())
    }

    /// Acknowledge a callback query with a short notification.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: &str,
    ) -> TransportResult<()> {
        let body = json!({
            "callback_query_id": callback_query_id,
            "text": text,
        });

        self.call::<bool>("answerCallbackQuery", &body).await?;
        Ok(())
    }

    /// Send a previously uploaded file by its file ID.
    ///
    /// `method` is `sendPhoto`, `sendVideo` or `sendDocument` and `field` the
    /// matching body field.
    async fn send_file(
        &self,
        method: &str,
        field: &str,
        chat_id: i64,
        file_id: &str,
        caption: Option<&str>,
    ) -> TransportResult<()> {
        let mut body = json!({ "chat_id": chat_id });
        body[field] = json!(file_id);
        if let Some(caption) = caption {
            body["caption"] = json!(caption);
        }

        self.call::<Value>(method, &body).await?;
        Ok(())
    }

    /// Point Telegram at a webhook URL.
    pub async fn set_webhook(&self, url: &str) -> TransportResult<()> {
        self.call::<bool>("setWebhook", &json!({ "url": url })).await?;
        Ok(())
    }

    /// Remove any webhook so `getUpdates` can be used.
    pub async fn delete_webhook(&self) -> TransportResult<()> {
        self.call::<bool>("deleteWebhook", &json!({})).await?;
        Ok(())
    }
}

/// Build an `InlineKeyboardMarkup` from button (label, callback_data) pairs.
///
/// Places all buttons on a single row.
pub fn build_keyboard(buttons: &[(String, String)]) -> InlineKeyboardMarkup {
    let row = buttons
        .iter()
        .map(|(text, data)| InlineKeyboardButton {
            text: text.clone(),
            callback_data: data.clone(),
        })
        .collect();

    InlineKeyboardMarkup {
        inline_keyboard: vec![row],
    }
}

#[async_trait]
impl ChatTransport for TelegramApi {
    #[instrument(skip(self, text))]
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> TransportResult<()> {
        let parse_mode = match format {
            TextFormat::Plain => None,
            TextFormat::Html => Some("HTML"),
        };
        self.send_message(chat_id, text, parse_mode, None).await
    }

    #[instrument(skip(self, text, control))]
    async fn send_confirmation(
        &self,
        chat_id: i64,
        text: &str,
        control: &ConfirmationControl,
    ) -> TransportResult<()> {
        let keyboard = build_keyboard(&[(control.label.clone(), control.token.clone())]);
        self.send_message(chat_id, text, None, Some(keyboard)).await
    }

    #[instrument(skip(self, text))]
    async fn answer_activation(&self, activation_id: &str, text: &str) -> TransportResult<()> {
        self.answer_callback_query(activation_id, text).await
    }

    #[instrument(skip(self, media_handle, caption))]
    async fn send_photo(
        &self,
        chat_id: i64,
        media_handle: &str,
        caption: Option<&str>,
    ) -> TransportResult<()> {
        self.send_file("sendPhoto", "photo", chat_id, media_handle, caption)
            .await
    }

    #[instrument(skip(self, media_handle, caption))]
    async fn send_video(
        &self,
        chat_id: i64,
        media_handle: &str,
        caption: Option<&str>,
    ) -> TransportResult<()> {
        self.send_file("sendVideo", "video", chat_id, media_handle, caption)
            .await
    }

    #[instrument(skip(self, media_handle, caption))]
    async fn send_document(
        &self,
        chat_id: i64,
        media_handle: &str,
        caption: Option<&str>,
    ) -> TransportResult<()> {
        self.send_file("sendDocument", "document", chat_id, media_handle, caption)
            .await
    }
}
