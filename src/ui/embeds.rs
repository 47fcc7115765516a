use serenity::{
    all::Timestamp,
    builder::{CreateEmbed, CreateEmbedFooter},
};
use std::time::Duration;

use crate::{
    sources::TrackMetadata,
    ui::format::{format_progress, volume_bar},
};

/// Paleta de colores estandarizada para los embeds
pub mod colors {
    use serenity::all::Colour;

    pub const SUCCESS_GREEN: Colour = Colour::from_rgb(67, 181, 129);
    pub const ERROR_RED: Colour = Colour::from_rgb(220, 53, 69);
    pub const INFO_BLUE: Colour = Colour::from_rgb(52, 144, 220);
    pub const MUSIC_PURPLE: Colour = Colour::from_rgb(138, 43, 226);
    pub const NEUTRAL_GRAY: Colour = Colour::from_rgb(108, 117, 125);
}

const STANDARD_FOOTER: &str = "🎵 Music Session";

/// Entradas de la cola que se listan antes de resumir el resto
const QUEUE_PREVIEW: usize = 10;

pub fn create_now_playing_embed(
    url: &str,
    metadata: &TrackMetadata,
    elapsed: Option<Duration>,
    looping: bool,
) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("🎵 Now Playing")
        .description(format!("**{}**", metadata.title))
        .color(colors::SUCCESS_GREEN)
        .field("🎤 Author", &metadata.author, true)
        .field(
            "⏱️ Progress",
            format_progress(elapsed, metadata.duration_secs),
            true,
        );

    if looping {
        embed = embed.field("🔂 Loop", "On", true);
    }

    if let Some(thumbnail) = metadata.thumbnails.first() {
        embed = embed.thumbnail(thumbnail);
    }

    embed
        .url(url)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
}

pub fn create_queue_embed(current: Option<&str>, queue: &[String], looping: bool) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("📋 Queue")
        .color(colors::INFO_BLUE);

    if current.is_none() && queue.is_empty() {
        return embed
            .description("😴 **The queue is empty**")
            .color(colors::NEUTRAL_GRAY)
            .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
            .timestamp(Timestamp::now());
    }

    if let Some(current) = current {
        let status = if looping { "🔂" } else { "▶️" };
        embed = embed.field(format!("{} Playing", status), current, false);
    }

    if !queue.is_empty() {
        let mut description = String::new();
        for (i, track) in queue.iter().take(QUEUE_PREVIEW).enumerate() {
            description.push_str(&format!("**{}**. {}\n", i + 1, track));
        }
        if queue.len() > QUEUE_PREVIEW {
            description.push_str(&format!("… and {} more", queue.len() - QUEUE_PREVIEW));
        }
        embed = embed.field("Up next", description, false);
    }

    embed
        .field("Total", format!("{} queued", queue.len()), false)
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
        .timestamp(Timestamp::now())
}

pub fn create_track_added_embed(url: &str, position: usize) -> CreateEmbed {
    CreateEmbed::default()
        .title("➕ Added to queue")
        .description(url)
        .color(colors::MUSIC_PURPLE)
        .field("📍 Position", position.to_string(), true)
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
}

pub fn create_volume_embed(volume: u8) -> CreateEmbed {
    CreateEmbed::default()
        .title("🔊 Volume")
        .description(format!("{} {}%", volume_bar(volume), volume))
        .color(colors::INFO_BLUE)
}

pub fn create_help_embed(prefix: &str) -> CreateEmbed {
    CreateEmbed::default()
        .title("🎵 Music Session - Commands")
        .color(colors::INFO_BLUE)
        .field(
            "🔊 Connection",
            format!(
                "• `{p}join` - Join your voice channel\n\
                • `{p}leave` - Leave the voice channel",
                p = prefix
            ),
            false,
        )
        .field(
            "🎵 Playback",
            format!(
                "• `{p}play <url|search>` - Play or queue a track\n\
                • `{p}pause` / `{p}resume` - Pause or resume\n\
                • `{p}skip` - Skip to the next track\n\
                • `{p}stop` - Stop and clear the queue\n\
                • `{p}loop` - Toggle repeating the current track\n\
                • `{p}volume <0-100>` - Set the volume",
                p = prefix
            ),
            false,
        )
        .field(
            "📜 Info",
            format!(
                "• `{p}queue` - Show the queue\n\
                • `{p}nowplaying` - Show the current track",
                p = prefix
            ),
            false,
        )
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
}

pub fn create_error_embed(title: &str, description: &str) -> CreateEmbed {
    CreateEmbed::default()
        .title(format!("❌ {}", title))
        .description(description)
        .color(colors::ERROR_RED)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
}

pub fn create_success_embed(title: &str, description: &str) -> CreateEmbed {
    CreateEmbed::default()
        .title(format!("✅ {}", title))
        .description(description)
        .color(colors::SUCCESS_GREEN)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
}

pub fn create_info_embed(title: &str, description: &str) -> CreateEmbed {
    CreateEmbed::default()
        .title(format!("ℹ️ {}", title))
        .description(description)
        .color(colors::INFO_BLUE)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(STANDARD_FOOTER))
}
