//! Text command tokenizer.

use linkdrop_core::MediaKind;

/// A classified inbound text command.
///
/// Parsing never fails: anything that does not match one of the known shapes
/// becomes [`BotCommand::Unrecognized`] and gets no reply.
///
/// # Examples
///
/// ```
/// use linkdrop_core::MediaKind;
/// use linkdrop_social::BotCommand;
///
/// assert_eq!(
///     BotCommand::parse("/start promo"),
///     BotCommand::Resolve { slug: Some("promo".into()) }
/// );
///
/// let add = BotCommand::parse(r#"/add promo ABC123 video "New Year Promo""#);
/// assert_eq!(
///     add,
///     BotCommand::Register {
///         slug: "promo".into(),
///         media_handle: "ABC123".into(),
///         media_kind: MediaKind::Video,
///         caption: "New Year Promo".into(),
///     }
/// );
///
/// assert_eq!(BotCommand::parse("/add promo ABC123 audio x"), BotCommand::Unrecognized);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `/start [slug]`: resolve a deep link, or show the welcome text
    Resolve {
        /// Slug from the deep link, if any
        slug: Option<String>,
    },
    /// `/add <slug> <handle> <kind> <caption...>`: register a mapping
    Register {
        /// New slug
        slug: String,
        /// Transport media handle
        media_handle: String,
        /// Delivery kind
        media_kind: MediaKind,
        /// Caption, rest of the line
        caption: String,
    },
    /// `/status`: privileged store report
    Status,
    /// `/help`: command listing
    Help,
    /// Anything else
    Unrecognized,
}

impl BotCommand {
    /// Classify a message text.
    pub fn parse(text: &str) -> Self {
        let (word, rest) = next_token(text);

        // "/start@my_bot" is how Telegram addresses commands in groups
        let word = word.split('@').next().unwrap_or(word);

        match word {
            "/start" => {
                let slug = first_line(rest).trim();
                BotCommand::Resolve {
                    slug: (!slug.is_empty()).then(|| slug.to_string()),
                }
            }
            "/add" => Self::parse_register(rest),
            "/status" => BotCommand::Status,
            "/help" => BotCommand::Help,
            _ => BotCommand::Unrecognized,
        }
    }

    fn parse_register(args: &str) -> Self {
        let (slug, rest) = next_token(args);
        let (media_handle, rest) = next_token(rest);
        let (kind, rest) = next_token(rest);
        let caption = unquote(first_line(rest));

        if slug.is_empty() || media_handle.is_empty() || caption.is_empty() {
            return BotCommand::Unrecognized;
        }

        match kind.parse::<MediaKind>() {
            Ok(media_kind) => BotCommand::Register {
                slug: slug.to_string(),
                media_handle: media_handle.to_string(),
                media_kind,
                caption: caption.to_string(),
            },
            Err(_) => BotCommand::Unrecognized,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::Resolve { .. } => "start",
            BotCommand::Register { .. } => "add",
            BotCommand::Status => "status",
            BotCommand::Help => "help",
            BotCommand::Unrecognized => "unrecognized",
        }
    }

    /// Whether the command needs the privileged identity.
    pub fn requires_privilege(&self) -> bool {
        matches!(self, BotCommand::Register { .. } | BotCommand::Status)
    }
}

/// Split off the first whitespace-delimited token.
fn next_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], &text[end..]),
        None => (text, ""),
    }
}

/// Leading whitespace removed, cut at the first line break.
fn first_line(text: &str) -> &str {
    text.trim_start().lines().next().unwrap_or("")
}

/// Drop one pair of surrounding quotes; `""` alone is kept as written.
fn unquote(caption: &str) -> &str {
    caption
        .strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .filter(|inner| !inner.is_empty())
        .unwrap_or(caption)
}
