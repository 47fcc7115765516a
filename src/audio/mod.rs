//! # Audio Module
//!
//! Playback state for a voice session and the voice stack it drives.
//!
//! ## Architecture
//!
//! ### [`session`] - Playback Session
//! - Owns the voice connection, the FIFO queue, loop flag and volume
//! - Reacts to output-actor events to advance the queue
//! - Tracks elapsed time across pause/resume
//!
//! ### [`manager`] - Session Registry
//! - One session per guild, serialized behind a mutex
//! - Spawns the task that feeds player events back into the session
//!
//! ### [`voice`] - Songbird Backend
//! - Voice transport and output actor built on songbird calls and track handles
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use music_session::audio::{manager::SessionManager, session::SessionOptions, voice::SongbirdTransport};
//! use music_session::sources::YouTubeClient;
//! use serenity::all::{ChannelId, GuildId};
//! use std::sync::Arc;
//!
//! # async fn example(songbird: Arc<songbird::Songbird>) -> anyhow::Result<()> {
//! let manager = SessionManager::new(
//!     Arc::new(SongbirdTransport::new(songbird)),
//!     Arc::new(YouTubeClient::new()),
//!     SessionOptions::default(),
//! );
//!
//! let session = manager.get_or_create(GuildId::new(123456789));
//! let mut session = session.lock().await;
//! session.join(Some(ChannelId::new(987654321))).await?;
//! session.play("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//! session.pause()?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod events;
pub mod manager;
pub mod queue;
pub mod session;
pub mod transport;
pub mod voice;

#[cfg(test)]
pub(crate) mod testing;
