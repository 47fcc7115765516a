//! # Bot Module
//!
//! Discord glue for the playback sessions: a Serenity [`EventHandler`] that
//! reads prefix commands from messages and drives the guild's
//! [`PlaybackSession`](crate::audio::session::PlaybackSession).

use serenity::{
    all::{Context, EventHandler, Message, Ready},
    async_trait,
};
use std::sync::Arc;
use tracing::{error, info};

pub mod commands;

use crate::{audio::manager::SessionManager, config::Config};

/// Handler principal de eventos de Discord
pub struct MusicBot {
    config: Arc<Config>,
    /// Sesiones de reproducción, una por servidor
    pub sessions: Arc<SessionManager>,
}

impl MusicBot {
    pub fn new(config: Config, sessions: Arc<SessionManager>) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.config.command_prefix
    }
}

#[async_trait]
impl EventHandler for MusicBot {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("✅ {} connected to Discord", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(command) = commands::parse(&msg.content, self.prefix()) else {
            return;
        };

        if let Err(e) = commands::handle(&ctx, &msg, command, self).await {
            error!("Error replying to command: {:?}", e);
        }
    }
}
