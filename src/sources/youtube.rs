use anyhow::{Context, Result};
use async_process::Command;
use async_trait::async_trait;
use serde::Deserialize;
use songbird::input::{Input, YoutubeDl};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use super::{MediaLookup, SearchResult, TrackMetadata};

const YTDLP: &str = "yt-dlp";

/// Cantidad de resultados que se piden a yt-dlp por búsqueda
const SEARCH_LIMIT: usize = 5;

/// Cliente para interactuar con YouTube/yt-dlp.
///
/// Búsqueda y metadata ejecutan `yt-dlp --dump-json`; los streams se entregan
/// al input [`YoutubeDl`] de songbird, que resuelve el mejor formato de audio
/// cuando el driver inicia el track.
pub struct YouTubeClient {
    http: reqwest::Client,
    // Limitar procesos concurrentes de yt-dlp para evitar rate limiting
    rate_limiter: Semaphore,
}

/// Entrada que imprime `--flat-playlist` por cada resultado
#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: String,
    title: Option<String>,
    url: Option<String>,
    webpage_url: Option<String>,
}

/// Información extraída de yt-dlp para un video
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    title: String,
    uploader: Option<String>,
    channel: Option<String>,
    duration: Option<f64>,
    thumbnail: Option<String>,
    #[serde(default)]
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl YouTubeClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            rate_limiter: Semaphore::new(3),
        }
    }

    async fn run_ytdlp(&self, args: &[&str]) -> Result<String> {
        let _permit = self.rate_limiter.acquire().await?;

        let output = Command::new(YTDLP)
            .args(args)
            .output()
            .await
            .context("failed to run yt-dlp")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp error: {}", error.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for YouTubeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaLookup for YouTubeClient {
    async fn open_stream(&self, track_id: &str) -> Result<Input> {
        debug!("🎵 Opening audio stream for {}", track_id);
        Ok(YoutubeDl::new(self.http.clone(), track_id.to_string()).into())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        info!("🔍 Searching: {}", query);

        let search_query = format!("ytsearch{}:{}", SEARCH_LIMIT, query);
        let stdout = self
            .run_ytdlp(&[
                "--dump-json",
                "--flat-playlist",
                "--skip-download",
                "--no-warnings",
                &search_query,
            ])
            .await?;

        Ok(parse_search_output(&stdout))
    }

    async fn metadata(&self, track_id: &str) -> Result<TrackMetadata> {
        debug!("📊 Fetching metadata for {}", track_id);

        let stdout = self
            .run_ytdlp(&[
                "--dump-json",
                "--no-playlist",
                "--skip-download",
                "--no-warnings",
                track_id,
            ])
            .await?;

        parse_info(&stdout)
    }
}

/// Un objeto JSON por línea; las líneas inválidas se omiten
fn parse_search_output(stdout: &str) -> Vec<SearchResult> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<FlatEntry>(line).ok())
        .map(|entry| SearchResult {
            url: entry
                .webpage_url
                .or(entry.url)
                .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", entry.id)),
            title: entry.title.unwrap_or_default(),
        })
        .collect()
}

fn parse_info(stdout: &str) -> Result<TrackMetadata> {
    let info: YtDlpInfo =
        serde_json::from_str(stdout.trim()).context("failed to parse yt-dlp output")?;

    let mut thumbnails: Vec<String> = info.thumbnails.into_iter().map(|t| t.url).collect();
    if thumbnails.is_empty() {
        thumbnails.extend(info.thumbnail);
    }

    Ok(TrackMetadata {
        title: info.title,
        author: info.uploader.or(info.channel).unwrap_or_default(),
        duration_secs: info.duration.map(|d| d.max(0.0) as u64).unwrap_or(0),
        thumbnails,
    })
}
