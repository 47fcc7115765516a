use thiserror::Error;

/// Errores de [`PlaybackSession`](crate::audio::session::PlaybackSession).
///
/// No hay reintentos ni rollback: quien llama recibe el error tal cual y la
/// sesión conserva el estado al que haya llegado.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Sin conexión de voz activa, o la conexión ya se cerró
    #[error("not connected to a voice channel")]
    NotConnected,

    #[error("volume must be between 0 and 100, got {0}")]
    InvalidVolume(i64),

    /// Consulta de metadata con un identificador vacío
    #[error("no track identifier provided ({0})")]
    MissingIdentifier(&'static str),

    #[error("queue is full (max {0} tracks)")]
    QueueFull(usize),

    /// Errores del transporte de voz, del actor de salida o de la fuente de medios
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
