use anyhow::Result;
use serenity::{
    builder::{CreateEmbed, CreateMessage},
    model::{channel::Message, id::ChannelId, id::GuildId},
    prelude::Context,
};
use tracing::{info, warn};

use crate::{
    bot::MusicBot,
    error::SessionError,
    ui::embeds,
};

/// Comando con prefijo ya parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join,
    Leave,
    Play(String),
    Pause,
    Resume,
    Stop,
    Skip,
    Loop,
    Volume(Option<String>),
    Queue,
    NowPlaying,
    Help,
    Unknown(String),
}

/// Parsea `content` si empieza con `prefix`; otros mensajes devuelven `None`
pub fn parse(content: &str, prefix: &str) -> Option<Command> {
    let body = content.trim().strip_prefix(prefix)?;
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (body, ""),
    };

    if name.is_empty() {
        return None;
    }

    let command = match name.to_lowercase().as_str() {
        "join" => Command::Join,
        "leave" | "disconnect" => Command::Leave,
        "play" | "p" => Command::Play(args.to_string()),
        "pause" => Command::Pause,
        "resume" | "unpause" => Command::Resume,
        "stop" => Command::Stop,
        "skip" | "next" => Command::Skip,
        "loop" => Command::Loop,
        "volume" | "vol" => Command::Volume((!args.is_empty()).then(|| args.to_string())),
        "queue" | "q" => Command::Queue,
        "nowplaying" | "np" => Command::NowPlaying,
        "help" => Command::Help,
        other => Command::Unknown(other.to_string()),
    };

    Some(command)
}

enum Reply {
    Text(String),
    Embed(CreateEmbed),
}

/// Ejecuta un comando y responde el mensaje, convirtiendo errores en respuestas
pub async fn handle(ctx: &Context, msg: &Message, command: Command, bot: &MusicBot) -> Result<()> {
    let Some(guild_id) = msg.guild_id else {
        msg.reply(ctx, "❌ Music commands only work in servers").await?;
        return Ok(());
    };

    info!(
        "📝 {:?} from {} in guild {}",
        command, msg.author.name, guild_id
    );

    let reply = match run(ctx, msg, guild_id, command, bot).await {
        Ok(reply) => reply,
        Err(e) => {
            if let SessionError::Upstream(inner) = &e {
                warn!("Command failed in guild {}: {:?}", guild_id, inner);
            }
            Reply::Embed(embeds::create_error_embed(
                "Error",
                &describe(&e, bot.prefix()),
            ))
        }
    };

    match reply {
        Reply::Text(text) => {
            msg.reply(ctx, text).await?;
        }
        Reply::Embed(embed) => {
            msg.channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed).reference_message(msg))
                .await?;
        }
    }

    Ok(())
}

async fn run(
    ctx: &Context,
    msg: &Message,
    guild_id: GuildId,
    command: Command,
    bot: &MusicBot,
) -> std::result::Result<Reply, SessionError> {
    let prefix = bot.prefix();

    let session = bot.sessions.get_or_create(guild_id);
    let mut session = session.lock().await;

    let reply = match command {
        Command::Join => {
            let Some(channel_id) = caller_voice_channel(ctx, msg) else {
                return Ok(Reply::Text("❌ You need to be in a voice channel".into()));
            };
            session.join(Some(channel_id)).await?;
            Reply::Embed(embeds::create_success_embed(
                "Connected",
                &format!("Joined <#{}>", channel_id),
            ))
        }
        Command::Leave => {
            drop(session);
            bot.sessions.remove(guild_id).await?;
            Reply::Text("👋 Left the voice channel".into())
        }
        Command::Play(query) => {
            if query.is_empty() {
                return Ok(Reply::Text(format!("Usage: `{}play <url|search>`", prefix)));
            }

            if !session.is_connected() {
                session.join(caller_voice_channel(ctx, msg)).await?;
            }

            let url = if is_url(&query) {
                query
            } else {
                match session.search(&query).await? {
                    Some(url) => url,
                    None => {
                        return Ok(Reply::Text(format!("🔍 No results for `{}`", query)));
                    }
                }
            };

            if session.current_track().is_some() {
                session.add_to_queue(url.clone())?;
                Reply::Embed(embeds::create_track_added_embed(&url, session.queue().len()))
            } else {
                session.play(&url).await?;
                Reply::Text(format!("🎵 Now playing: {}", url))
            }
        }
        Command::Pause => {
            session.pause()?;
            Reply::Text("⏸️ Paused".into())
        }
        Command::Resume => {
            session.resume()?;
            Reply::Text("▶️ Resumed".into())
        }
        Command::Stop => {
            session.stop()?;
            Reply::Text("⏹️ Stopped and cleared the queue".into())
        }
        Command::Skip => {
            session.skip().await?;
            match session.current_track() {
                Some(next) => Reply::Text(format!("⏭️ Skipped, now playing: {}", next)),
                None => Reply::Text("⏭️ Skipped, nothing left in the queue".into()),
            }
        }
        Command::Loop => {
            if session.toggle_loop() {
                Reply::Text("🔂 Loop enabled".into())
            } else {
                Reply::Text("➡️ Loop disabled".into())
            }
        }
        Command::Volume(None) => Reply::Embed(embeds::create_volume_embed(session.volume())),
        Command::Volume(Some(raw)) => {
            let Ok(volume) = raw.parse::<i64>() else {
                return Ok(Reply::Text(format!("Usage: `{}volume <0-100>`", prefix)));
            };
            session.set_volume(volume)?;
            Reply::Embed(embeds::create_volume_embed(session.volume()))
        }
        Command::Queue => Reply::Embed(embeds::create_queue_embed(
            session.current_track(),
            &session.queue(),
            session.is_looping(),
        )),
        Command::NowPlaying => match session.current_track().map(str::to_string) {
            Some(url) => {
                let elapsed = session.elapsed();
                let metadata = session.metadata(&url).await?;
                Reply::Embed(embeds::create_now_playing_embed(
                    &url,
                    &metadata,
                    elapsed,
                    session.is_looping(),
                ))
            }
            None => Reply::Embed(embeds::create_info_embed(
                "Now Playing",
                "Nothing is playing right now",
            )),
        },
        Command::Help => Reply::Embed(embeds::create_help_embed(prefix)),
        Command::Unknown(name) => Reply::Text(format!(
            "❓ Unknown command `{}`. Try `{}help`",
            name, prefix
        )),
    };

    Ok(reply)
}

/// Texto legible para un comando fallido
pub fn describe(error: &SessionError, prefix: &str) -> String {
    match error {
        SessionError::NotConnected => format!(
            "I'm not connected to a voice channel. Use `{}join` first.",
            prefix
        ),
        SessionError::InvalidVolume(_) => "Volume must be between 0 and 100.".to_string(),
        SessionError::MissingIdentifier(_) => "There is no track to look up.".to_string(),
        SessionError::QueueFull(max) => format!("The queue is full ({} tracks).", max),
        SessionError::Upstream(e) => format!("Something went wrong: {}", e),
    }
}

fn caller_voice_channel(ctx: &Context, msg: &Message) -> Option<ChannelId> {
    let guild = msg.guild(&ctx.cache)?;
    let channel_id = guild
        .voice_states
        .get(&msg.author.id)
        .and_then(|state| state.channel_id);
    channel_id
}

fn is_url(query: &str) -> bool {
    url::Url::parse(query)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("!join", "!"), Some(Command::Join));
        assert_eq!(
            parse("!play  never gonna give you up ", "!"),
            Some(Command::Play("never gonna give you up".into()))
        );
        assert_eq!(parse("!PAUSE", "!"), Some(Command::Pause));
        assert_eq!(parse("!np", "!"), Some(Command::NowPlaying));
        assert_eq!(parse("!volume", "!"), Some(Command::Volume(None)));
        assert_eq!(
            parse("!vol 40", "!"),
            Some(Command::Volume(Some("40".into())))
        );
        assert_eq!(
            parse("!dance", "!"),
            Some(Command::Unknown("dance".into()))
        );
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(parse("hello there", "!"), None);
        assert_eq!(parse("!", "!"), None);
        assert_eq!(parse("?play x", "!"), None);
        assert_eq!(parse("m!skip", "m!"), Some(Command::Skip));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_url("http://youtu.be/dQw4w9WgXcQ"));
        assert!(!is_url("never gonna give you up"));
        assert!(!is_url("file:///etc/passwd"));
    }

    #[test]
    fn test_describe_errors() {
        assert_eq!(
            describe(&SessionError::NotConnected, "!"),
            "I'm not connected to a voice channel. Use `!join` first."
        );
        assert_eq!(
            describe(&SessionError::InvalidVolume(120), "!"),
            "Volume must be between 0 and 100."
        );
        assert_eq!(
            describe(&SessionError::QueueFull(3), "!"),
            "The queue is full (3 tracks)."
        );
        assert_eq!(
            describe(&SessionError::Upstream(anyhow::anyhow!("boom")), "!"),
            "Something went wrong: boom"
        );
    }
}
