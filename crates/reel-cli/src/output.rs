//! Output formatting for CLI

use crate::commands::Reply;
use reel_core::{NowPlaying, VideoView};

const HELP: &str = "Available commands:
    NUMBER_OF_VIDEOS - Shows how many videos are in the library.
    SHOW_ALL_VIDEOS - Lists all videos from the library.
    PLAY <video_id> - Plays specified video.
    PLAY_RANDOM - Plays a random video from the library.
    STOP - Stop the current video.
    PAUSE - Pause the current video.
    CONTINUE - Resume the current paused video.
    SHOW_PLAYING - Displays the title, video_id, video tags and paused status of the video that is currently playing (or paused).
    CREATE_PLAYLIST <playlist_name> - Creates a new (empty) playlist with the provided name.
    ADD_TO_PLAYLIST <playlist_name> <video_id> - Adds the requested video to the playlist.
    REMOVE_FROM_PLAYLIST <playlist_name> <video_id> - Removes the specified video from the specified playlist
    CLEAR_PLAYLIST <playlist_name> - Removes all videos from the playlist.
    DELETE_PLAYLIST <playlist_name> - Deletes the playlist.
    SHOW_PLAYLIST <playlist_name> - List all the videos in this playlist.
    SHOW_ALL_PLAYLISTS - Display all the available playlists.
    SEARCH_VIDEOS <search_term> - Display all the videos whose titles contain the search_term.
    SEARCH_VIDEOS_WITH_TAG <tag_name> - Display all videos whose tags contains the provided tag.
    FLAG_VIDEO <video_id> <flag_reason> - Mark a video as flagged.
    ALLOW_VIDEO <video_id> - Removes a flag from a video.
    HISTORY - Show the playback and moderation events of this session.
    HELP - Displays help.
    EXIT - Terminates the program execution.";

const PLAY_PROMPT: &str =
    "Would you like to play any of the above? If yes, specify the number of the video.";
const NOT_A_NUMBER: &str = "If your answer is not a valid number, we will assume it's a no.";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Format a reply as output lines
pub fn render(reply: &Reply, format: OutputFormat) -> Vec<String> {
    match format {
        OutputFormat::Json => {
            vec![serde_json::to_string(reply).unwrap_or_else(|_| "{}".to_string())]
        }
        OutputFormat::Text => render_text(reply),
    }
}

fn indented(videos: &[VideoView]) -> impl Iterator<Item = String> + '_ {
    videos.iter().map(|v| format!("  {}", v))
}

fn render_text(reply: &Reply) -> Vec<String> {
    let mut lines = Vec::new();

    match reply {
        Reply::VideoCount { count } => lines.push(format!("{} videos in the library", count)),
        Reply::Videos { videos } => {
            lines.push("Here's a list of all available videos:".to_string());
            lines.extend(indented(videos));
        }
        Reply::Played { outcome } => {
            if let Some(ref stopped) = outcome.stopped {
                lines.push(format!("Stopping video: {}", stopped.title));
            }
            lines.push(format!("Playing video: {}", outcome.playing.title));
        }
        Reply::Stopped { video } => lines.push(format!("Stopping video: {}", video.title)),
        Reply::Paused { video } => lines.push(format!("Pausing video: {}", video.title)),
        Reply::Continued { video } => lines.push(format!("Continuing video: {}", video.title)),
        Reply::NowPlaying { now } => match now {
            NowPlaying::Idle => lines.push("No video is currently playing".to_string()),
            NowPlaying::Playing { video, paused } => {
                let suffix = if *paused { " - PAUSED" } else { "" };
                lines.push(format!("Currently playing: {}{}", video.summary(), suffix));
            }
        },
        Reply::PlaylistCreated { name } => {
            lines.push(format!("Successfully created new playlist: {}", name))
        }
        Reply::AddedToPlaylist { playlist, video } => {
            lines.push(format!("Added video to {}: {}", playlist, video.title))
        }
        Reply::RemovedFromPlaylist { playlist, video } => {
            lines.push(format!("Removed video from {}: {}", playlist, video.title))
        }
        Reply::PlaylistCleared { name } => {
            lines.push(format!("Successfully removed all videos from {}", name))
        }
        Reply::PlaylistDeleted { name } => lines.push(format!("Deleted playlist: {}", name)),
        Reply::Playlists { names } => {
            if names.is_empty() {
                lines.push("No playlists exist yet".to_string());
            } else {
                lines.push("Showing all playlists:".to_string());
                lines.extend(names.iter().map(|n| format!("  {}", n)));
            }
        }
        Reply::Playlist { name, playlist } => {
            lines.push(format!("Showing playlist: {}", name));
            if playlist.videos.is_empty() {
                lines.push("  No videos here yet".to_string());
            } else {
                lines.extend(indented(&playlist.videos));
            }
        }
        Reply::SearchResults { results } => {
            if results.is_empty() {
                lines.push(format!("No search results for {}", results.query));
            } else {
                lines.push(format!("Here are the results for {}:", results.query));
                lines.extend(results.ranked().map(|(rank, v)| format!("  {}) {}", rank, v)));
                lines.push(PLAY_PROMPT.to_string());
                lines.push(NOT_A_NUMBER.to_string());
            }
        }
        Reply::Flagged { outcome } => {
            if let Some(ref stopped) = outcome.stopped {
                lines.push(format!("Stopping video: {}", stopped.title));
            }
            lines.push(format!(
                "Successfully flagged video: {} (reason: {})",
                outcome.video.title, outcome.reason
            ));
        }
        Reply::Allowed { video } => {
            lines.push(format!("Successfully removed flag from video: {}", video.title))
        }
        Reply::History { events } => {
            if events.is_empty() {
                lines.push("No session events recorded".to_string());
            }
            for record in events {
                let event = serde_json::to_string(&record.event).unwrap_or_default();
                lines.push(format!(
                    "  #{} {} {}",
                    record.sequence,
                    record.timestamp.format("%H:%M:%S"),
                    event
                ));
            }
        }
        Reply::NoSelection => {}
        Reply::Invalid { .. } => lines.push(
            "Please enter a valid command, type HELP for a list of available commands."
                .to_string(),
        ),
        Reply::Help => lines.extend(HELP.lines().map(String::from)),
        Reply::Exit => {
            lines.push("Reel has now terminated its execution. Thank you and goodbye!".to_string())
        }
        Reply::Failed { action, message, .. } => match action {
            Some(action) => lines.push(format!("{}: {}", action, message)),
            None => lines.push(message.clone()),
        },
    }

    lines
}
