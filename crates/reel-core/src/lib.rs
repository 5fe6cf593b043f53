//! Reel Core - Video Catalog Browser Library
//!
//! This crate provides the core functionality for browsing a video catalog:
//! - Playback state machine (play, stop, pause, resume, random play)
//! - Case-insensitive title and tag search with ranked results
//! - Moderation flags that hide videos from discovery and playback
//! - User playlists with case-insensitive names
//! - Session event log
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Reel Core                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │    Video     │  │   Playlists  │  │    Event     │          │
//! │  │   Catalog    │  │              │  │     Log      │          │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘          │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Playback   │                              │
//! │                    │   Session   │                              │
//! │                    └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use reel_core::{PlaybackSession, SessionConfig, VideoLibrary};
//!
//! let mut session = PlaybackSession::new(VideoLibrary::bundled(), SessionConfig::default());
//! let outcome = session.play("amazing_cats_video_id").unwrap();
//! assert_eq!(outcome.playing.title, "Amazing Cats");
//! ```

pub mod catalog;
pub mod error;
pub mod events;
pub mod playlist;
pub mod session;
pub mod types;

pub use catalog::{VideoCatalog, VideoLibrary};
pub use error::{Error, Result};
pub use events::{SessionEvent, SessionEventRecord};
pub use playlist::{Playlist, Playlists};
pub use session::PlaybackSession;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "Reel Core initialized");
}
