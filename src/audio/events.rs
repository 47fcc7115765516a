use tokio::sync::mpsc;
use tracing::debug;

/// Estado del actor de salida según su último aviso a la sesión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Lo que el actor de salida informa sobre un track cargado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEventKind {
    Playing,
    Paused,
    /// El stream terminó.
    Ended,
    /// La reproducción falló; el track se descarta sin repetirlo.
    Errored(String),
}

/// Aviso de estado etiquetado con el token del track al que pertenece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEvent {
    pub token: u64,
    pub kind: PlayerEventKind,
}

pub type PlayerEventReceiver = mpsc::UnboundedReceiver<PlayerEvent>;

/// Se entrega al actor de salida para un track; cada evento lleva el token
/// de ese track para que la sesión descarte avisos de tracks ya reemplazados.
#[derive(Debug, Clone)]
pub struct TrackEvents {
    token: u64,
    tx: mpsc::UnboundedSender<PlayerEvent>,
}

impl TrackEvents {
    pub fn new(token: u64, tx: mpsc::UnboundedSender<PlayerEvent>) -> Self {
        Self { token, tx }
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn emit(&self, kind: PlayerEventKind) {
        let event = PlayerEvent {
            token: self.token,
            kind,
        };
        if self.tx.send(event).is_err() {
            debug!("Session gone, dropping player event for track #{}", self.token);
        }
    }
}
