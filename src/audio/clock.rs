use std::time::Duration;
use tokio::time::Instant;

/// Tiempo reproducido del track cargado a lo largo de pausas y reanudaciones.
///
/// El tiempo solo se acumula al pausar; mientras suena, el tramo en curso
/// se mide desde `started`.
#[derive(Debug, Default)]
pub struct ElapsedClock {
    started: Option<Instant>,
    accumulated: Duration,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inicia un tramo de reproducción
    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Cierra el tramo en curso y lo suma al total
    pub fn pause(&mut self, now: Instant) {
        if let Some(started) = self.started.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.accumulated = Duration::ZERO;
    }

    /// Tiempo total transcurrido, o `None` si no hay un tramo en curso
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started
            .map(|started| self.accumulated + now.saturating_duration_since(started))
    }
}
