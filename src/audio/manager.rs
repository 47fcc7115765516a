use dashmap::DashMap;
use serenity::model::id::GuildId;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    audio::{
        events::PlayerEventReceiver,
        session::{PlaybackSession, SessionOptions},
        transport::VoiceTransport,
    },
    error::Result,
    sources::MediaLookup,
};

pub type SharedSession = Arc<Mutex<PlaybackSession>>;

/// Mantiene una [`PlaybackSession`] por servidor.
///
/// Los comandos toman el mutex de la sesión, igual que la tarea que aplica
/// los eventos del reproductor: todo lo que toca una sesión va de uno en uno.
pub struct SessionManager {
    sessions: DashMap<GuildId, SharedSession>,
    transport: Arc<dyn VoiceTransport>,
    media: Arc<dyn MediaLookup>,
    options: SessionOptions,
}

impl SessionManager {
    pub fn new(
        transport: Arc<dyn VoiceTransport>,
        media: Arc<dyn MediaLookup>,
        options: SessionOptions,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            transport,
            media,
            options,
        }
    }

    pub fn get_or_create(&self, guild_id: GuildId) -> SharedSession {
        self.sessions
            .entry(guild_id)
            .or_insert_with(|| self.spawn_session(guild_id))
            .clone()
    }

    /// Sale del canal de voz y descarta la sesión del servidor
    pub async fn remove(&self, guild_id: GuildId) -> Result<()> {
        if let Some((_, session)) = self.sessions.remove(&guild_id) {
            session.lock().await.leave().await?;
        }
        Ok(())
    }

    fn spawn_session(&self, guild_id: GuildId) -> SharedSession {
        let (session, events) = PlaybackSession::new(
            guild_id,
            self.transport.clone(),
            self.media.clone(),
            self.options,
        );
        let session = Arc::new(Mutex::new(session));

        tokio::spawn(pump_events(Arc::downgrade(&session), events));
        debug!("Created playback session for guild {}", guild_id);

        session
    }
}

async fn pump_events(session: Weak<Mutex<PlaybackSession>>, mut events: PlayerEventReceiver) {
    while let Some(event) = events.recv().await {
        let Some(session) = session.upgrade() else {
            break;
        };
        session.lock().await.handle_event(event).await;
    }
}
