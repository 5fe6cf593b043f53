//! Core types for Reel

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reason recorded when a video is flagged without one
pub const DEFAULT_FLAG_REASON: &str = "Not supplied";

/// Unique identifier for a browsing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog video record
///
/// Everything except the flag is fixed for the lifetime of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    id: String,
    title: String,
    tags: Vec<String>,
    flag: Option<String>,
}

impl Video {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags,
            flag: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Flag reason, if the video is flagged
    pub fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }

    /// Set or clear the moderation flag
    pub fn set_flag(&mut self, reason: Option<String>) {
        self.flag = reason;
    }

    /// Case-insensitive exact tag match
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Case-insensitive title substring match
    pub fn title_contains(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Snapshot of a video handed back to callers for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoView {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl VideoView {
    /// `Title (id) [tag1 tag2]` without the flag annotation
    pub fn summary(&self) -> String {
        format!("{} ({}) [{}]", self.title, self.id, self.tags.join(" "))
    }
}

impl From<&Video> for VideoView {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            tags: video.tags.clone(),
            flag: video.flag.clone(),
        }
    }
}

impl std::fmt::Display for VideoView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())?;
        if let Some(ref reason) = self.flag {
            write!(f, " - FLAGGED (reason: {})", reason)?;
        }
        Ok(())
    }
}

/// Playback state machine states
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing playing
    #[default]
    Idle,
    /// A video is loaded, possibly paused
    Playing { video_id: String, paused: bool },
}

impl PlaybackState {
    pub fn video_id(&self) -> Option<&str> {
        match self {
            PlaybackState::Idle => None,
            PlaybackState::Playing { video_id, .. } => Some(video_id),
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Playing { paused: true, .. })
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Playing { paused: false, .. } => write!(f, "playing"),
            PlaybackState::Playing { paused: true, .. } => write!(f, "paused"),
        }
    }
}

/// Result of `show_playing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NowPlaying {
    Idle,
    Playing { video: VideoView, paused: bool },
}

/// Result of a successful play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// Video implicitly stopped before the new one started
    pub stopped: Option<VideoView>,
    pub playing: VideoView,
}

/// Result of a successful flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOutcome {
    /// Set when the flagged video was playing and had to be stopped
    pub stopped: Option<VideoView>,
    pub video: VideoView,
    pub reason: String,
}

/// Ranked search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The term or tag that was searched for
    pub query: String,
    /// Matches in display order; rank `n` is `entries[n - 1]`
    pub entries: Vec<VideoView>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entry at a 1-based rank
    pub fn get(&self, rank: usize) -> Option<&VideoView> {
        rank.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Resolve a free-form rank answer. Only a bare run of ASCII digits naming
    /// an in-range rank selects anything: no sign, no surrounding whitespace.
    pub fn select(&self, choice: &str) -> Option<&VideoView> {
        if choice.is_empty() || !choice.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        choice.parse::<usize>().ok().and_then(|rank| self.get(rank))
    }

    /// Iterate `(rank, entry)` pairs
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &VideoView)> {
        self.entries.iter().enumerate().map(|(i, v)| (i + 1, v))
    }
}

/// Contents of a playlist, with flagged members annotated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistView {
    pub name: String,
    pub videos: Vec<VideoView>,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Reason used when a video is flagged without one
    pub default_flag_reason: String,
    /// Record state changes in the session event log
    pub record_events: bool,
    /// Oldest events are dropped past this count
    pub max_event_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_flag_reason: DEFAULT_FLAG_REASON.to_string(),
            record_events: true,
            max_event_history: 256,
        }
    }
}
