//! Slug resolution and delivery protocol.
//!
//! Resolution happens in two phases that share no in-process state:
//!
//! 1. `/start <slug>` looks the slug up and, if it exists, answers with a
//!    confirmation button whose callback token is the slug itself.
//! 2. Pressing the button brings the token back; the slug is looked up again,
//!    the activation is acknowledged, and only then is the media sent.
//!
//! Every failure is caught here and turned into a reply. Nothing that goes
//! wrong in one event reaches the caller.

use crate::replies;
use crate::{AdminGate, BotCommand, ChatTransport, ConfirmationControl, TextFormat};
use derive_getters::Getters;
use linkdrop_core::{MediaDescriptor, MediaKind};
use linkdrop_database::{MediaRepository, RegisterOutcome};
use linkdrop_error::{DatabaseErrorKind, LinkdropResult};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

/// A text message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Chat to reply in
    pub chat_id: i64,
    /// Platform user ID of the sender
    pub sender_id: i64,
    /// Raw message text
    pub text: String,
}

/// A press of a confirmation button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlActivation {
    /// Platform ID used to acknowledge this activation
    pub activation_id: String,
    /// Chat the media is delivered to
    pub chat_id: i64,
    /// Platform user ID of the presser
    pub sender_id: i64,
    /// Callback payload: the slug
    pub token: String,
}

/// Anything the bot reacts to.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum InboundEvent {
    /// Text command
    Message(IncomingMessage),
    /// Button press
    Activation(ControlActivation),
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// `/start` without a slug: welcome text sent
    Welcome,
    /// Phase 1 found the slug and offered a button
    ConfirmationOffered {
        /// Token carried by the button
        slug: String,
    },
    /// Slug not registered (either phase)
    NotFound,
    /// Phase 2 delivered the media
    Delivered {
        /// Delivery call used
        kind: MediaKind,
    },
    /// Phase 2 found a stored kind it cannot deliver
    UnknownKind,
    /// New descriptor stored
    Registered {
        /// Slug that was stored
        slug: String,
    },
    /// Registration target already existed
    DuplicateSlug,
    /// Status report sent
    Status {
        /// Total descriptors reported
        total: i64,
    },
    /// Help text sent
    Help,
    /// Privileged command from another identity
    Unauthorized,
    /// Not a command; no reply
    Ignored,
    /// Store or transport failed; generic error reply attempted
    Failed,
}

/// Fixed per-process bot settings.
///
/// # Examples
///
/// ```
/// use linkdrop_social::BotSettingsBuilder;
///
/// let settings = BotSettingsBuilder::default()
///     .admin_id(6319246165_i64)
///     .bot_username("sorrybabubot")
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.mode(), "polling");
/// assert!(settings.sample_slug().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct BotSettings {
    /// The privileged identity
    admin_id: i64,
    /// Bot username used to build deep links
    bot_username: String,
    /// Operating mode shown in status reports
    #[builder(default = "\"polling\".to_string()")]
    mode: String,
    /// Slug advertised in the welcome text
    #[builder(default)]
    sample_slug: Option<String>,
}

/// Shared context for every event handler.
///
/// Constructed once at startup and shared through an `Arc`; holds the store,
/// the transport, and the authorization gate. Events handed to
/// [`LinkdropBot::spawn_dispatch`] are tracked until [`LinkdropBot::drain`]
/// collects them.
pub struct LinkdropBot {
    repository: Arc<dyn MediaRepository>,
    transport: Arc<dyn ChatTransport>,
    gate: AdminGate,
    settings: BotSettings,
    in_flight: Mutex<JoinSet<()>>,
}

impl LinkdropBot {
    /// Create the bot context.
    pub fn new(
        repository: Arc<dyn MediaRepository>,
        transport: Arc<dyn ChatTransport>,
        settings: BotSettings,
    ) -> Self {
        info!(
            bot = %settings.bot_username,
            mode = %settings.mode,
            "Creating bot context"
        );
        Self {
            repository,
            transport,
            gate: AdminGate::new(settings.admin_id),
            settings,
            in_flight: Mutex::new(JoinSet::new()),
        }
    }

    /// The settings this bot was built with.
    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Handle one inbound event.
    pub async fn dispatch(&self, event: InboundEvent) -> DispatchOutcome {
        match event {
            InboundEvent::Message(message) => self.handle_message(&message).await,
            InboundEvent::Activation(activation) => self.handle_activation(&activation).await,
        }
    }

    /// Handle an event on its own task.
    pub fn spawn_dispatch(self: &Arc<Self>, event: InboundEvent) {
        let bot = Arc::clone(self);
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Reap finished tasks so the set only holds live ones
        while in_flight.try_join_next().is_some() {}

        in_flight.spawn(async move {
            bot.dispatch(event).await;
        });
    }

    /// Wait for every event spawned so far to finish.
    ///
    /// Returns how many tasks were awaited.
    pub async fn drain(&self) -> usize {
        let mut pending = std::mem::take(
            &mut *self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        if !pending.is_empty() {
            info!(count = pending.len(), "Waiting for in-flight events");
        }

        let mut finished = 0;
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Event task ended abnormally");
            }
            finished += 1;
        }
        finished
    }

    /// Interpret a text message and run the command it names.
    #[instrument(
        skip(self, message),
        fields(
            chat_id = message.chat_id,
            sender_id = message.sender_id,
            command = tracing::field::Empty
        )
    )]
    pub async fn handle_message(&self, message: &IncomingMessage) -> DispatchOutcome {
        let command = BotCommand::parse(&message.text);
        tracing::Span::current().record("command", command.name());

        match self.execute(message, &command).await {
            Ok(outcome) => {
                debug!(?outcome, "Command handled");
                outcome
            }
            Err(e) => {
                error!(error = %e, "Command failed");
                if let Some(reply) = failure_reply(&command) {
                    if let Err(e) = self
                        .transport
                        .send_text(message.chat_id, reply, TextFormat::Plain)
                        .await
                    {
                        warn!(error = %e, "Failed to send error reply");
                    }
                }
                DispatchOutcome::Failed
            }
        }
    }

    async fn execute(
        &self,
        message: &IncomingMessage,
        command: &BotCommand,
    ) -> LinkdropResult<DispatchOutcome> {
        if command.requires_privilege() && !self.gate.is_privileged(message.sender_id) {
            info!("Rejecting privileged command from non-admin");
            self.reply(message.chat_id, replies::NOT_AUTHORIZED, TextFormat::Plain)
                .await?;
            return Ok(DispatchOutcome::Unauthorized);
        }

        match command {
            BotCommand::Resolve { slug } => self.resolve(message.chat_id, slug.as_deref()).await,
            BotCommand::Register {
                slug,
                media_handle,
                media_kind,
                caption,
            } => {
                self.register(message.chat_id, slug, media_handle, *media_kind, caption)
                    .await
            }
            BotCommand::Status => self.status(message.chat_id).await,
            BotCommand::Help => {
                self.reply(message.chat_id, &replies::help(), TextFormat::Plain)
                    .await?;
                Ok(DispatchOutcome::Help)
            }
            BotCommand::Unrecognized => Ok(DispatchOutcome::Ignored),
        }
    }

    /// Phase 1: offer a confirmation button for a registered slug.
    async fn resolve(&self, chat_id: i64, slug: Option<&str>) -> LinkdropResult<DispatchOutcome> {
        let Some(slug) = slug else {
            let text = replies::welcome(
                &self.settings.bot_username,
                self.settings.sample_slug.as_deref(),
            );
            self.reply(chat_id, &text, TextFormat::Plain).await?;
            return Ok(DispatchOutcome::Welcome);
        };

        let Some(descriptor) = self.repository.lookup(slug).await? else {
            debug!(slug, "Slug not registered");
            self.reply(chat_id, replies::FILE_NOT_FOUND, TextFormat::Plain)
                .await?;
            return Ok(DispatchOutcome::NotFound);
        };

        let control = ConfirmationControl::new(replies::SEND_BUTTON, descriptor.slug().as_str());
        self.transport
            .send_confirmation(chat_id, &replies::confirmation_text(&descriptor), &control)
            .await?;

        Ok(DispatchOutcome::ConfirmationOffered {
            slug: control.token,
        })
    }

    async fn register(
        &self,
        chat_id: i64,
        slug: &str,
        media_handle: &str,
        media_kind: MediaKind,
        caption: &str,
    ) -> LinkdropResult<DispatchOutcome> {
        let outcome = self
            .repository
            .register(slug, media_handle, media_kind.as_str(), Some(caption))
            .await?;

        match outcome {
            RegisterOutcome::Registered(descriptor) => {
                let link = replies::deep_link(&self.settings.bot_username, descriptor.slug());
                info!(slug, kind = %media_kind, "Registered new file");
                self.reply(
                    chat_id,
                    &replies::registered(&descriptor, &link),
                    TextFormat::Html,
                )
                .await?;
                Ok(DispatchOutcome::Registered {
                    slug: descriptor.slug().clone(),
                })
            }
            RegisterOutcome::AlreadyExists => {
                self.reply(chat_id, &replies::duplicate_slug(slug), TextFormat::Plain)
                    .await?;
                Ok(DispatchOutcome::DuplicateSlug)
            }
            RegisterOutcome::InvalidKind(kind) => {
                // The tokenizer only produces recognized kinds
                warn!(kind, "Store rejected media kind");
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    async fn status(&self, chat_id: i64) -> LinkdropResult<DispatchOutcome> {
        let total = self.repository.count().await?;
        self.reply(
            chat_id,
            &replies::status(total, &self.settings.mode),
            TextFormat::Html,
        )
        .await?;
        Ok(DispatchOutcome::Status { total })
    }

    /// Phase 2: re-resolve the slug from a button press and send the media.
    #[instrument(
        skip(self, activation),
        fields(chat_id = activation.chat_id, slug = %activation.token)
    )]
    pub async fn handle_activation(&self, activation: &ControlActivation) -> DispatchOutcome {
        let mut answered = false;
        match self.deliver(activation, &mut answered).await {
            Ok(outcome) => {
                debug!(?outcome, "Activation handled");
                outcome
            }
            Err(e) => {
                error!(error = %e, "Delivery failed");
                self.report_delivery_failure(activation, answered).await;
                DispatchOutcome::Failed
            }
        }
    }

    /// Tell the user delivery failed.
    ///
    /// An activation can be answered once; after the interim acknowledgment
    /// the error goes to the chat instead.
    async fn report_delivery_failure(&self, activation: &ControlActivation, answered: bool) {
        let result = if answered {
            self.transport
                .send_text(
                    activation.chat_id,
                    replies::ERROR_SENDING_FILE,
                    TextFormat::Plain,
                )
                .await
        } else {
            self.transport
                .answer_activation(&activation.activation_id, replies::ERROR_SENDING_FILE)
                .await
        };

        if let Err(e) = result {
            warn!(error = %e, "Failed to report delivery failure");
        }
    }

    async fn deliver(
        &self,
        activation: &ControlActivation,
        answered: &mut bool,
    ) -> LinkdropResult<DispatchOutcome> {
        let descriptor = match self.repository.lookup(&activation.token).await {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => {
                debug!("Slug disappeared between phases");
                self.transport
                    .answer_activation(&activation.activation_id, replies::FILE_NOT_FOUND)
                    .await?;
                return Ok(DispatchOutcome::NotFound);
            }
            Err(e) if matches!(e.kind, DatabaseErrorKind::UnknownMediaKind(_)) => {
                warn!(error = %e, "Stored file has an unknown type");
                *answered = self.acknowledge_sending(activation).await;
                self.reply(
                    activation.chat_id,
                    replies::UNKNOWN_FILE_TYPE,
                    TextFormat::Plain,
                )
                .await?;
                return Ok(DispatchOutcome::UnknownKind);
            }
            Err(e) => return Err(e.into()),
        };

        // The acknowledgment must reach the user before the upload starts
        *answered = self.acknowledge_sending(activation).await;
        self.send_media(activation.chat_id, &descriptor).await?;

        info!(kind = %descriptor.media_kind(), "File sent");
        Ok(DispatchOutcome::Delivered {
            kind: *descriptor.media_kind(),
        })
    }

    /// Returns whether the activation was answered.
    async fn acknowledge_sending(&self, activation: &ControlActivation) -> bool {
        // An expired activation can no longer be answered; delivery still proceeds
        match self
            .transport
            .answer_activation(&activation.activation_id, replies::SENDING_FILE)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to acknowledge activation");
                false
            }
        }
    }

    async fn send_media(&self, chat_id: i64, descriptor: &MediaDescriptor) -> LinkdropResult<()> {
        let handle = descriptor.media_handle();
        let caption = descriptor.caption().as_deref();

        match descriptor.media_kind() {
            MediaKind::Photo => self.transport.send_photo(chat_id, handle, caption).await?,
            MediaKind::Video => self.transport.send_video(chat_id, handle, caption).await?,
            MediaKind::Document => {
                self.transport
                    .send_document(chat_id, handle, caption)
                    .await?
            }
        }
        Ok(())
    }

    async fn reply(&self, chat_id: i64, text: &str, format: TextFormat) -> LinkdropResult<()> {
        self.transport.send_text(chat_id, text, format).await?;
        Ok(())
    }
}

/// Generic reply for a command that failed on the store or transport.
fn failure_reply(command: &BotCommand) -> Option<&'static str> {
    match command {
        BotCommand::Resolve { slug: Some(_) } => Some(replies::ERROR_RETRIEVING_FILE),
        BotCommand::Register { .. } => Some(replies::ERROR_ADDING_FILE),
        BotCommand::Status => Some(replies::ERROR_RETRIEVING_STATUS),
        _ => None,
    }
}
