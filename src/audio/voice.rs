//! Songbird-backed voice transport and output actor.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use songbird::{
    input::Input, tracks::TrackHandle, Call, Event, EventContext,
    EventHandler as VoiceEventHandler, Songbird, TrackEvent,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{
    events::{PlayerEventKind, TrackEvents},
    transport::{TrackControl, VoiceConnection, VoiceTransport},
};

/// Conecta a canales de voz a través del manager de songbird registrado en el cliente
pub struct SongbirdTransport {
    manager: Arc<Songbird>,
}

impl SongbirdTransport {
    pub fn new(manager: Arc<Songbird>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl VoiceTransport for SongbirdTransport {
    async fn connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Arc<dyn VoiceConnection>> {
        let call = self
            .manager
            .join(guild_id, channel_id)
            .await
            .context("failed to join voice channel")?;

        Ok(Arc::new(SongbirdConnection {
            manager: self.manager.clone(),
            guild_id,
            channel_id,
            call,
            destroyed: AtomicBool::new(false),
        }))
    }
}

pub struct SongbirdConnection {
    manager: Arc<Songbird>,
    guild_id: GuildId,
    channel_id: ChannelId,
    call: Arc<Mutex<Call>>,
    destroyed: AtomicBool,
}

#[async_trait]
impl VoiceConnection for SongbirdConnection {
    fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    fn is_destroyed(&self) -> bool {
        // la llamada desaparece del manager si expulsan al bot o el servidor la cierra
        self.destroyed.load(Ordering::Acquire) || self.manager.get(self.guild_id).is_none()
    }

    async fn destroy(&self) -> Result<()> {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        self.manager
            .remove(self.guild_id)
            .await
            .context("failed to leave voice channel")?;

        info!("🔌 Voice connection destroyed in guild {}", self.guild_id);
        Ok(())
    }

    async fn play(&self, input: Input, events: TrackEvents) -> Result<Box<dyn TrackControl>> {
        let handle = {
            let mut call = self.call.lock().await;
            call.play_only_input(input)
        };

        let forwards = [
            (TrackEvent::Play, Forward::Playing),
            (TrackEvent::Pause, Forward::Paused),
            (TrackEvent::End, Forward::Ended),
            (TrackEvent::Error, Forward::Errored),
        ];

        for (event, forward) in forwards {
            handle
                .add_event(
                    Event::Track(event),
                    EventForwarder {
                        events: events.clone(),
                        forward,
                    },
                )
                .context("failed to register track event handler")?;
        }

        debug!("Track #{} handed to songbird", events.token());
        Ok(Box::new(SongbirdTrack { handle }))
    }
}

#[derive(Debug, Clone, Copy)]
enum Forward {
    Playing,
    Paused,
    Ended,
    Errored,
}

/// Reenvía los eventos de track de songbird al canal de eventos de la sesión
struct EventForwarder {
    events: TrackEvents,
    forward: Forward,
}

#[async_trait]
impl VoiceEventHandler for EventForwarder {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        let kind = match self.forward {
            Forward::Playing => PlayerEventKind::Playing,
            Forward::Paused => PlayerEventKind::Paused,
            Forward::Ended => PlayerEventKind::Ended,
            Forward::Errored => {
                let reason = match ctx {
                    EventContext::Track(tracks) => tracks
                        .first()
                        .map(|(state, _)| format!("{:?}", state.playing))
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                PlayerEventKind::Errored(reason)
            }
        };

        self.events.emit(kind);
        None
    }
}

pub struct SongbirdTrack {
    handle: TrackHandle,
}

impl TrackControl for SongbirdTrack {
    fn pause(&self) -> Result<()> {
        Ok(self.handle.pause()?)
    }

    fn resume(&self) -> Result<()> {
        Ok(self.handle.play()?)
    }

    fn stop(&self) -> Result<()> {
        Ok(self.handle.stop()?)
    }

    fn set_volume(&self, level: f32) -> Result<()> {
        Ok(self.handle.set_volume(level)?)
    }
}
