//! Long-polling loop for Telegram Bot API `getUpdates`.

use super::api::TelegramApi;
use crate::LinkdropBot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Longest pause between failed `getUpdates` calls.
const MAX_BACKOFF_SECS: u64 = 60;

/// Run the long-polling loop until `cancel` flips to `true`.
///
/// Each decoded update is handled on its own task so a slow upload never
/// holds up the next update; the tasks are tracked by the bot and drained
/// at shutdown. Failed polls back off exponentially from one
/// second up to a minute.
pub async fn poll_loop(
    api: Arc<TelegramApi>,
    bot: Arc<LinkdropBot>,
    poll_timeout: u64,
    mut cancel: watch::Receiver<bool>,
) {
    let mut offset: Option<i64> = None;
    let mut backoff_secs = 1u64;

    info!(poll_timeout, "Telegram poller started");

    loop {
        if *cancel.borrow() {
            info!("Telegram poller shutting down");
            return;
        }

        let updates = tokio::select! {
            result = api.get_updates(offset, poll_timeout) => result,
            _ = cancel.changed() => {
                info!("Telegram poller cancelled");
                return;
            }
        };

        match updates {
            Ok(updates) => {
                backoff_secs = 1;

                for update in updates {
                    offset = Some(update.update_id + 1);

                    let update_id = update.update_id;
                    let Some(event) = update.into_event() else {
                        debug!(update_id, "Ignoring update");
                        continue;
                    };

                    bot.spawn_dispatch(event);
                }
            }
            Err(e) => {
                warn!(error = %e, backoff_secs, "getUpdates failed, backing off");
                tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
            }
        }
    }
}
