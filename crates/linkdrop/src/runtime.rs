//! Process wiring: store, bot context, update intake, shutdown.

use crate::{AppState, LinkdropConfig, OperatingMode, SeedEntry, create_router};
use linkdrop_database::{
    InMemoryMediaRepository, MediaRepository, PostgresMediaRepository, RegisterOutcome,
};
use linkdrop_error::{
    ConfigError, DatabaseError, DatabaseErrorKind, LinkdropResult, ServerError, ServerErrorKind,
};
use linkdrop_social::telegram::{TelegramApi, poll_loop};
use linkdrop_social::{BotSettingsBuilder, LinkdropBot};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Maximum pooled PostgreSQL connections.
const POOL_SIZE: u32 = 10;

/// Connect to PostgreSQL and create the table if it is missing.
#[instrument(skip(database_url))]
pub async fn open_postgres(database_url: &str) -> LinkdropResult<PostgresMediaRepository> {
    let url = database_url.to_string();
    // Pool construction checks a connection out, which blocks
    let repository = tokio::task::spawn_blocking(move || {
        PostgresMediaRepository::connect(&url, POOL_SIZE)
    })
    .await
    .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))??;

    repository.ensure_schema().await?;
    info!("Database ready");
    Ok(repository)
}

/// Pick the mapping store for this process.
pub async fn open_repository(
    config: &LinkdropConfig,
    in_memory: bool,
) -> LinkdropResult<Arc<dyn MediaRepository>> {
    if in_memory {
        warn!("Using in-memory store; registrations are lost on exit");
        return Ok(Arc::new(InMemoryMediaRepository::new()));
    }

    let database_url = config
        .database_url()
        .as_deref()
        .ok_or_else(|| ConfigError::new("DATABASE_URL is required unless --in-memory is set"))?;

    Ok(Arc::new(open_postgres(database_url).await?))
}

/// Register configured seed descriptors whose slugs are still free.
///
/// Seeding never aborts startup; failures are logged and skipped.
pub async fn seed_repository(repository: &dyn MediaRepository, seeds: &[SeedEntry]) -> usize {
    let mut registered = 0;

    for entry in seeds {
        let outcome = repository
            .register(
                &entry.slug,
                &entry.media_handle,
                entry.media_kind.as_str(),
                entry.caption.as_deref(),
            )
            .await;

        match outcome {
            Ok(RegisterOutcome::Registered(_)) => {
                info!(slug = %entry.slug, "Seeded file");
                registered += 1;
            }
            Ok(RegisterOutcome::AlreadyExists) => {
                debug!(slug = %entry.slug, "Seed already present");
            }
            Ok(RegisterOutcome::InvalidKind(kind)) => {
                warn!(slug = %entry.slug, kind, "Seed has invalid media kind");
            }
            Err(e) => {
                error!(slug = %entry.slug, error = %e, "Failed to seed file");
            }
        }
    }

    registered
}

/// Run the bot until Ctrl-C.
///
/// Serves HTTP in both modes. In polling mode a `getUpdates` loop runs
/// alongside the server; in webhook mode Telegram is pointed at
/// `<webhook_url>/<bot_token>`.
#[instrument(skip_all, fields(mode = %config.environment(), port = config.port()))]
pub async fn serve(config: LinkdropConfig, in_memory: bool) -> LinkdropResult<()> {
    let repository = open_repository(&config, in_memory).await?;
    seed_repository(repository.as_ref(), config.seed()).await;

    let api = Arc::new(TelegramApi::new(config.bot_token()));
    let bot_username = match config.bot_username() {
        Some(username) => username.clone(),
        None => api.get_me().await?.username.ok_or_else(|| {
            ConfigError::new("Telegram reported no bot username; set BOT_USERNAME")
        })?,
    };
    info!(bot = %bot_username, "Bot identity resolved");

    let settings = BotSettingsBuilder::default()
        .admin_id(*config.admin_id())
        .bot_username(bot_username)
        .mode(config.environment().to_string())
        .sample_slug(config.seed().first().map(|entry| entry.slug.clone()))
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid bot settings: {}", e)))?;

    let bot = Arc::new(LinkdropBot::new(repository, api.clone(), settings));
    let router = create_router(AppState::new(
        bot.clone(),
        config.bot_token(),
        *config.environment(),
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], *config.port()));
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
    })?;
    info!(%addr, "Server listening");

    let (cancel_tx, cancel_rx) = watch::channel(false);

    let poller = match config.environment() {
        OperatingMode::Polling => {
            api.delete_webhook().await?;
            info!("Polling mode active");
            Some(tokio::spawn(poll_loop(
                api.clone(),
                bot.clone(),
                *config.poll_timeout(),
                cancel_rx,
            )))
        }
        OperatingMode::Webhook => {
            let endpoint = config
                .webhook_endpoint()
                .ok_or_else(|| ConfigError::new("WEBHOOK_URL is required in webhook mode"))?;
            api.set_webhook(&endpoint).await?;
            info!(
                base = config.webhook_url().as_deref().unwrap_or_default(),
                "Webhook registered"
            );
            None
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(cancel_tx))
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    if let Some(poller) = poller {
        if let Err(e) = poller.await {
            warn!(error = %e, "Poller task ended abnormally");
        }
    }

    // Updates already accepted are finished, not cut off between ack and upload
    let drained = bot.drain().await;
    debug!(drained, "In-flight events finished");

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C and tells the poller to stop.
async fn shutdown_signal(cancel_tx: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }

    info!("Shutting down gracefully");
    // The poller may already be gone
    let _ = cancel_tx.send(true);
}

/// Create the mapping table and exit.
pub async fn init_database(config: &LinkdropConfig) -> LinkdropResult<()> {
    let database_url = config
        .database_url()
        .as_deref()
        .ok_or_else(|| ConfigError::new("DATABASE_URL is required"))?;

    open_postgres(database_url).await?;
    Ok(())
}
