//! Error types for Reel Core

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Session error types
///
/// `Display` yields only the reason phrase. Callers prefix the action
/// ("Cannot play video: ...") since the same condition is reported by
/// several operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Video errors
    #[error("Video does not exist")]
    VideoNotFound { id: String },

    #[error("Video is currently flagged (reason: {reason})")]
    VideoFlagged { id: String, reason: String },

    #[error("Video is already flagged")]
    AlreadyFlagged { id: String },

    #[error("Video is not flagged")]
    NotFlagged { id: String },

    #[error("No videos available")]
    NoVideosAvailable,

    // Playback errors
    #[error("No video is currently playing")]
    NothingPlaying,

    #[error("Video already paused: {title}")]
    AlreadyPaused { title: String },

    #[error("Video is not paused")]
    NotPaused { title: String },

    // Playlist errors
    #[error("A playlist with the same name already exists")]
    DuplicatePlaylist { name: String },

    #[error("Playlist does not exist")]
    PlaylistNotFound { name: String },

    #[error("Video already added")]
    AlreadyInPlaylist { playlist: String, id: String },

    #[error("Video is not in playlist")]
    VideoNotInPlaylist { playlist: String, id: String },

    // Catalog errors
    #[error("Invalid catalog entry on line {line}: {reason}")]
    CatalogParse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl Error {
    /// Returns true if the session can keep accepting commands after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::CatalogParse { .. } | Error::Io(_))
    }

    /// Returns the error code for structured output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::VideoNotFound { .. } => "VIDEO_NOT_FOUND",
            Error::VideoFlagged { .. } => "VIDEO_FLAGGED",
            Error::AlreadyFlagged { .. } => "ALREADY_FLAGGED",
            Error::NotFlagged { .. } => "NOT_FLAGGED",
            Error::NoVideosAvailable => "NO_VIDEOS_AVAILABLE",
            Error::NothingPlaying => "NOTHING_PLAYING",
            Error::AlreadyPaused { .. } => "ALREADY_PAUSED",
            Error::NotPaused { .. } => "NOT_PAUSED",
            Error::DuplicatePlaylist { .. } => "DUPLICATE_PLAYLIST",
            Error::PlaylistNotFound { .. } => "PLAYLIST_NOT_FOUND",
            Error::AlreadyInPlaylist { .. } => "ALREADY_IN_PLAYLIST",
            Error::VideoNotInPlaylist { .. } => "VIDEO_NOT_IN_PLAYLIST",
            Error::CatalogParse { .. } => "CATALOG_PARSE",
            Error::Io(_) => "IO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_reason_only() {
        let err = Error::VideoFlagged {
            id: "v1".to_string(),
            reason: "Needs review".to_string(),
        };
        assert_eq!(err.to_string(), "Video is currently flagged (reason: Needs review)");

        let err = Error::AlreadyPaused { title: "Amazing Cats".to_string() };
        assert_eq!(err.to_string(), "Video already paused: Amazing Cats");
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::NothingPlaying.is_recoverable());
        assert!(Error::PlaylistNotFound { name: "x".into() }.is_recoverable());
        assert!(!Error::Io("denied".into()).is_recoverable());
        assert!(!Error::CatalogParse { line: 1, reason: "empty id".into() }.is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.error_code(), "IO");
    }
}
