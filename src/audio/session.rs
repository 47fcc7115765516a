use serenity::model::id::{ChannelId, GuildId};
use songbird::input::Input;
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, time::Instant};
use tracing::{debug, error, info, warn};

use crate::{
    audio::{
        clock::ElapsedClock,
        events::{PlayerEvent, PlayerEventKind, PlayerEventReceiver, PlayerStatus, TrackEvents},
        queue::MusicQueue,
        transport::{TrackControl, VoiceConnection, VoiceTransport},
    },
    error::{Result, SessionError},
    sources::{MediaLookup, TrackMetadata},
};

pub const DEFAULT_VOLUME: u8 = 50;

/// Parámetros con los que se crea una sesión
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub default_volume: u8,
    pub max_queue_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_volume: DEFAULT_VOLUME,
            max_queue_size: 1000,
        }
    }
}

/// Track entregado actualmente al actor de salida
struct ActiveTrack {
    token: u64,
    control: Box<dyn TrackControl>,
    /// Se activa cuando el actor avisa que el track ya suena
    audible: bool,
}

/// Estado de reproducción de una sesión de voz: conexión, cola, loop,
/// volumen y tiempo transcurrido.
///
/// El actor de salida informa cambios de estado como [`PlayerEvent`]s en el
/// receptor que devuelve [`PlaybackSession::new`]; quien posee la sesión los
/// aplica con [`PlaybackSession::handle_event`], de uno en uno.
/// Transiciones:
///
/// - Idle → Playing al iniciar un track (el reloj arranca y se reinicia
///   con el primer aviso `Playing` del actor)
/// - Playing → Paused al pausar (se acumula el tramo en curso)
/// - Paused → Playing al reanudar
/// - cualquiera → Idle al terminar el stream o con stop (el tiempo se reinicia)
pub struct PlaybackSession {
    guild_id: GuildId,
    transport: Arc<dyn VoiceTransport>,
    media: Arc<dyn MediaLookup>,
    connection: Option<Arc<dyn VoiceConnection>>,
    queue: MusicQueue,
    current_track: Option<String>,
    track: Option<ActiveTrack>,
    next_token: u64,
    volume: u8,
    loop_enabled: bool,
    status: PlayerStatus,
    clock: ElapsedClock,
    events_tx: mpsc::UnboundedSender<PlayerEvent>,
}

impl PlaybackSession {
    pub fn new(
        guild_id: GuildId,
        transport: Arc<dyn VoiceTransport>,
        media: Arc<dyn MediaLookup>,
        options: SessionOptions,
    ) -> (Self, PlayerEventReceiver) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let session = Self {
            guild_id,
            transport,
            media,
            connection: None,
            queue: MusicQueue::new(options.max_queue_size),
            current_track: None,
            track: None,
            next_token: 1,
            volume: options.default_volume.min(100),
            loop_enabled: false,
            status: PlayerStatus::Idle,
            clock: ElapsedClock::new(),
            events_tx,
        };

        (session, events_rx)
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Conecta al canal de voz de quien llama.
    ///
    /// No hace nada si no está en un canal de voz o si la sesión ya está
    /// conectada a ese canal. Unirse a otro canal reemplaza la conexión.
    pub async fn join(&mut self, channel_id: Option<ChannelId>) -> Result<()> {
        let Some(channel_id) = channel_id else {
            debug!("Caller is not in a voice channel, not joining");
            return Ok(());
        };

        if let Some(connection) = &self.connection {
            if !connection.is_destroyed() && connection.channel_id() == channel_id {
                debug!("Already connected to {} in guild {}", channel_id, self.guild_id);
                return Ok(());
            }
        }

        let connection = self.transport.connect(self.guild_id, channel_id).await?;
        self.connection = Some(connection);

        info!("🔊 Joined voice channel {} in guild {}", channel_id, self.guild_id);
        Ok(())
    }

    /// Detiene la reproducción y libera la conexión de voz
    pub async fn leave(&mut self) -> Result<()> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };

        let stopped = self.stop();
        connection.destroy().await?;

        info!("👋 Left voice channel in guild {}", self.guild_id);
        stopped
    }

    /// Reproduce `track_id` de inmediato, reemplazando lo que esté cargado.
    ///
    /// Sin conexión activa falla con [`SessionError::NotConnected`] antes de
    /// tocar el estado.
    pub async fn play(&mut self, track_id: &str) -> Result<()> {
        let connection = self.live_connection()?;
        let input = self.media.open_stream(track_id).await?;
        self.start(connection, track_id.to_string(), input).await
    }

    async fn start(
        &mut self,
        connection: Arc<dyn VoiceConnection>,
        track_id: String,
        input: Input,
    ) -> Result<()> {
        let token = self.next_token;
        self.next_token += 1;

        let events = TrackEvents::new(token, self.events_tx.clone());
        let control = connection.play(input, events).await?;

        if let Err(e) = control.set_volume(self.level()) {
            warn!("Could not apply volume to track #{}: {:?}", token, e);
        }

        info!("🎵 Playing: {}", track_id);
        self.track = Some(ActiveTrack {
            token,
            control,
            audible: false,
        });
        self.current_track = Some(track_id);

        // un track reemplazado cuenta como terminado
        self.transition(PlayerStatus::Idle);
        self.transition(PlayerStatus::Playing);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        if let Some(track) = &self.track {
            if self.status == PlayerStatus::Playing {
                track.control.pause()?;
                self.transition(PlayerStatus::Paused);
                info!("⏸️ Playback paused");
            }
        }
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        if let Some(track) = &self.track {
            if self.status == PlayerStatus::Paused {
                track.control.resume()?;
                self.transition(PlayerStatus::Playing);
                info!("▶️ Playback resumed");
            }
        }
        Ok(())
    }

    /// Detiene la reproducción y limpia la cola y el track actual
    pub fn stop(&mut self) -> Result<()> {
        let stopped = match self.track.take() {
            Some(track) => track.control.stop(),
            None => Ok(()),
        };

        self.queue.clear();
        self.current_track = None;
        self.transition(PlayerStatus::Idle);

        info!("⏹️ Playback stopped");
        Ok(stopped?)
    }

    /// Salta a la siguiente canción, ignorando el loop
    pub async fn skip(&mut self) -> Result<()> {
        let Some(track) = self.track.take() else {
            return Ok(());
        };

        if let Err(e) = track.control.stop() {
            warn!("Could not stop skipped track: {:?}", e);
        }

        info!("⏭️ Skipping {}", self.current_track.as_deref().unwrap_or("track"));
        self.advance(false).await
    }

    pub fn set_volume(&mut self, volume: i64) -> Result<()> {
        let volume = u8::try_from(volume)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or(SessionError::InvalidVolume(volume))?;

        self.volume = volume;

        if self.connection.is_some() {
            if let Some(track) = &self.track {
                track.control.set_volume(self.level())?;
            }
        }

        info!("🔊 Volume set to {}%", volume);
        Ok(())
    }

    /// URL del mejor resultado para `query`, `None` si no hay resultados
    pub async fn search(&self, query: &str) -> Result<Option<String>> {
        let results = self.media.search(query).await?;
        Ok(results.into_iter().next().map(|result| result.url))
    }

    pub fn add_to_queue(&mut self, track_id: impl Into<String>) -> Result<()> {
        self.queue.push(track_id.into())
    }

    /// Alterna el modo loop y devuelve el nuevo valor
    pub fn toggle_loop(&mut self) -> bool {
        self.loop_enabled = !self.loop_enabled;
        if self.loop_enabled {
            info!("🔂 Loop enabled");
        } else {
            info!("➡️ Loop disabled");
        }
        self.loop_enabled
    }

    pub fn queue(&self) -> Vec<String> {
        self.queue.tracks()
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_looping(&self) -> bool {
        self.loop_enabled
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|connection| !connection.is_destroyed())
    }

    /// Obtiene toda la metadata de un track en una sola consulta
    pub async fn metadata(&self, track_id: &str) -> Result<TrackMetadata> {
        self.lookup(track_id, "metadata").await
    }

    pub async fn thumbnail(&self, track_id: &str) -> Result<String> {
        self.lookup(track_id, "thumbnail")
            .await?
            .thumbnails
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("no thumbnails for {}", track_id).into())
    }

    pub async fn title(&self, track_id: &str) -> Result<String> {
        Ok(self.lookup(track_id, "title").await?.title)
    }

    pub async fn author(&self, track_id: &str) -> Result<String> {
        Ok(self.lookup(track_id, "author").await?.author)
    }

    /// Duración del track en segundos
    pub async fn duration(&self, track_id: &str) -> Result<u64> {
        Ok(self.lookup(track_id, "duration").await?.duration_secs)
    }

    /// Tiempo reproducido; `None` salvo que el actor esté reproduciendo
    pub fn elapsed(&self) -> Option<Duration> {
        match self.status {
            PlayerStatus::Playing => self.clock.elapsed(Instant::now()),
            _ => None,
        }
    }

    /// Aplica un aviso de estado del actor de salida.
    ///
    /// Los avisos de tracks que ya no están cargados se ignoran.
    pub async fn handle_event(&mut self, event: PlayerEvent) {
        let is_current = self
            .track
            .as_ref()
            .is_some_and(|track| track.token == event.token);

        if !is_current {
            debug!("Ignoring {:?} from stale track #{}", event.kind, event.token);
            return;
        }

        match event.kind {
            PlayerEventKind::Playing => self.confirm_playing(),
            PlayerEventKind::Paused => self.transition(PlayerStatus::Paused),
            PlayerEventKind::Ended => {
                debug!("Track #{} finished", event.token);
                self.finish_track(true).await;
            }
            PlayerEventKind::Errored(reason) => {
                error!("Track #{} failed: {}", event.token, reason);
                self.finish_track(false).await;
            }
        }
    }

    /// El primer aviso de reproducción del actor reinicia el reloj: hasta
    /// entonces el stream se estaba resolviendo.
    fn confirm_playing(&mut self) {
        let Some(track) = self.track.as_mut() else {
            return;
        };

        if !track.audible {
            track.audible = true;
            if self.status == PlayerStatus::Playing {
                self.clock.reset();
                self.clock.start(Instant::now());
                return;
            }
        }

        self.transition(PlayerStatus::Playing);
    }

    /// Único handler de fin de track: avanza la cola y la transición a Idle
    /// reinicia el tiempo transcurrido. Un track fallido nunca se repite,
    /// aunque el loop esté activo.
    async fn finish_track(&mut self, honour_loop: bool) {
        self.track = None;

        if let Err(e) = self.advance(honour_loop).await {
            error!("Error playing next track in guild {}: {:?}", self.guild_id, e);
        }
    }

    /// Repite el track actual si hay loop; si no, reproduce el siguiente de
    /// la cola; si no, detiene.
    async fn advance(&mut self, honour_loop: bool) -> Result<()> {
        let replay = if honour_loop && self.loop_enabled {
            self.current_track.clone()
        } else {
            None
        };

        let Some(next) = replay.or_else(|| self.queue.pop()) else {
            return self.stop();
        };

        if let Err(e) = self.play(&next).await {
            self.track = None;
            self.current_track = None;
            self.transition(PlayerStatus::Idle);
            return Err(e);
        }

        Ok(())
    }

    async fn lookup(&self, track_id: &str, field: &'static str) -> Result<TrackMetadata> {
        if track_id.trim().is_empty() {
            return Err(SessionError::MissingIdentifier(field));
        }
        Ok(self.media.metadata(track_id).await?)
    }

    fn live_connection(&self) -> Result<Arc<dyn VoiceConnection>> {
        match &self.connection {
            Some(connection) if !connection.is_destroyed() => Ok(connection.clone()),
            _ => Err(SessionError::NotConnected),
        }
    }

    fn level(&self) -> f32 {
        f32::from(self.volume) / 100.0
    }

    fn transition(&mut self, to: PlayerStatus) {
        if self.status == to {
            return;
        }

        let now = Instant::now();
        match to {
            PlayerStatus::Playing => self.clock.start(now),
            PlayerStatus::Paused => self.clock.pause(now),
            PlayerStatus::Idle => self.clock.reset(),
        }

        debug!("Player {:?} → {:?}", self.status, to);
        self.status = to;
    }
}
