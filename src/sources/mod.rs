pub mod youtube;

use anyhow::Result;
use async_trait::async_trait;
use songbird::input::Input;

pub use youtube::YouTubeClient;

/// Resultado de búsqueda, el mejor primero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
}

/// Información de metadata de track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    /// Nombre del autor o canal
    pub author: String,
    pub duration_secs: u64,
    /// URLs de miniaturas, en el orden de la fuente
    pub thumbnails: Vec<String>,
}

/// Resuelve identificadores de track en audio y metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaLookup: Send + Sync {
    /// Abre un stream solo de audio para el track
    async fn open_stream(&self, track_id: &str) -> Result<Input>;

    /// Busca en la fuente; resultados ordenados por relevancia
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    async fn metadata(&self, track_id: &str) -> Result<TrackMetadata>;
}
