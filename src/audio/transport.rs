//! Seams between the session and the voice stack.
//!
//! The session only talks to these traits; [`super::voice`] implements them
//! on top of songbird.

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use songbird::input::Input;
use std::sync::Arc;

use super::events::TrackEvents;

/// Establece conexiones de voz
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    async fn connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Arc<dyn VoiceConnection>>;
}

/// Conexión activa entre el bot y un canal de voz
#[async_trait]
pub trait VoiceConnection: Send + Sync {
    fn channel_id(&self) -> ChannelId;

    fn is_destroyed(&self) -> bool;

    async fn destroy(&self) -> Result<()>;

    /// Suscribe el actor de salida a esta conexión y reproduce `input`,
    /// reemplazando lo anterior. Los cambios de estado del nuevo track se
    /// informan por `events`.
    async fn play(&self, input: Input, events: TrackEvents) -> Result<Box<dyn TrackControl>>;
}

/// Controles del track cargado
pub trait TrackControl: Send + Sync {
    fn pause(&self) -> Result<()>;

    fn resume(&self) -> Result<()>;

    fn stop(&self) -> Result<()>;

    /// `level` va normalizado a `0.0..=1.0`
    fn set_volume(&self, level: f32) -> Result<()>;
}
