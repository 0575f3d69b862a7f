//! Reply texts.

use linkdrop_core::MediaDescriptor;

pub(crate) const FILE_NOT_FOUND: &str = "❌ File not found!";
pub(crate) const NOT_AUTHORIZED: &str = "❌ You are not authorized to use this command";
pub(crate) const SEND_BUTTON: &str = "📹 Send me";
pub(crate) const SENDING_FILE: &str = "⏳ Sending file...";
pub(crate) const UNKNOWN_FILE_TYPE: &str = "❌ Unknown file type";
pub(crate) const ERROR_RETRIEVING_FILE: &str = "❌ Error retrieving file";
pub(crate) const ERROR_ADDING_FILE: &str = "❌ Error adding file";
pub(crate) const ERROR_RETRIEVING_STATUS: &str = "❌ Error retrieving status";
pub(crate) const ERROR_SENDING_FILE: &str = "❌ Error sending file!";

/// Shareable `t.me` deep link that opens the bot with `/start <slug>`.
///
/// # Examples
///
/// ```
/// use linkdrop_social::deep_link;
///
/// assert_eq!(deep_link("sorrybabubot", "promo"), "https://t.me/sorrybabubot?start=promo");
/// ```
pub fn deep_link(bot_username: &str, slug: &str) -> String {
    format!(
        "https://t.me/{}?start={}",
        bot_username.trim_start_matches('@'),
        slug
    )
}

/// Escape text for Telegram's HTML parse mode.
///
/// # Examples
///
/// ```
/// use linkdrop_social::escape_html;
///
/// assert_eq!(escape_html("a <b> & c"), "a &lt;b&gt; &amp; c");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn confirmation_text(descriptor: &MediaDescriptor) -> String {
    format!("📄 {}", descriptor.label())
}

pub(crate) fn duplicate_slug(slug: &str) -> String {
    format!("❌ Slug \"{slug}\" already exists!")
}

pub(crate) fn welcome(bot_username: &str, sample_slug: Option<&str>) -> String {
    let mut text = format!(
        "🤖 Welcome to @{}!\n\nI can help you share and retrieve files securely.\n\n",
        bot_username.trim_start_matches('@')
    );

    if let Some(slug) = sample_slug {
        text.push_str("📌 Test the bot:\n");
        text.push_str(&format!("Use: {}\n\n", deep_link(bot_username, slug)));
    }

    text.push_str("💡 Commands:\n/start <slug> - Get a file\n/help - Show help");
    text
}

pub(crate) fn help() -> String {
    [
        "📚 Available Commands:\n",
        "/start <slug> - Get a file by slug",
        "/help - Show this message\n",
        "👨‍💼 Admin Commands:",
        "/add <slug> <file_id> <type> <caption> - Add a new file",
        "/status - Show bot status",
    ]
    .join("\n")
}

pub(crate) fn registered(descriptor: &MediaDescriptor, link: &str) -> String {
    format!(
        "✅ File added successfully!\n\n\
         📋 Details:\n\
         Slug: <code>{slug}</code>\n\
         Type: {kind}\n\
         Caption: {caption}\n\n\
         🔗 Share link:\n\
         <code>{link}</code>",
        slug = escape_html(descriptor.slug()),
        kind = descriptor.media_kind(),
        caption = escape_html(descriptor.caption().as_deref().unwrap_or("")),
        link = escape_html(link),
    )
}

pub(crate) fn status(total: i64, mode: &str) -> String {
    format!(
        "📊 Bot Status\n\n\
         📦 Total files: <b>{total}</b>\n\
         🤖 Bot: <b>Active</b>\n\
         ⚙️ Environment: <b>{}</b>",
        escape_html(mode)
    )
}
