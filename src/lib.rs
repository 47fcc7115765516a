//! Single-guild voice playback for a Discord bot: a FIFO queue of tracks,
//! transport controls and metadata lookups on top of songbird and yt-dlp.

pub mod audio;
pub mod bot;
pub mod config;
pub mod error;
pub mod sources;
pub mod ui;

pub use error::{Result, SessionError};
