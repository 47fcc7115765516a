use anyhow::Result;
use serenity::{model::gateway::GatewayIntents, Client};
use songbird::{SerenityInit, Songbird};
use std::sync::Arc;
use tracing::{error, info};

use music_session::{
    audio::{manager::SessionManager, voice::SongbirdTransport},
    bot::MusicBot,
    config::Config,
    sources::YouTubeClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("music_session=debug".parse()?)
                .add_directive("serenity=info".parse()?)
                .add_directive("songbird=info".parse()?),
        )
        .init();

    info!("🎵 Starting music-session v{}", env!("CARGO_PKG_VERSION"));

    if std::env::args().any(|arg| arg == "--health-check") {
        return health_check().await;
    }

    let config = Config::load()?;
    info!("{}", config.summary());

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let songbird = Songbird::serenity();
    let sessions = Arc::new(SessionManager::new(
        Arc::new(SongbirdTransport::new(songbird.clone())),
        Arc::new(YouTubeClient::new()),
        config.session_options(),
    ));

    let token = config.discord_token.clone();
    let handler = MusicBot::new(config, sessions);

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .register_songbird_with(songbird)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("⚠️ Shutdown signal received, closing...");
                shard_manager.shutdown_all().await;
            }
            Err(e) => error!("Could not listen for Ctrl+C: {:?}", e),
        }
    });

    info!("🚀 Bot started");
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    Ok(())
}

/// Termina con éxito si yt-dlp está disponible
async fn health_check() -> Result<()> {
    let yt_dlp = async_process::Command::new("yt-dlp")
        .arg("--version")
        .output()
        .await?;

    if yt_dlp.status.success() {
        println!("OK");
        Ok(())
    } else {
        anyhow::bail!("yt-dlp is missing");
    }
}
