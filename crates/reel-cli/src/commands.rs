//! Command parsing and dispatch

use rand::Rng;
use reel_core::{
    Error, FlagOutcome, NowPlaying, PlayOutcome, PlaybackSession, PlaylistView, SearchResults,
    SessionEventRecord, VideoView,
};
use serde::Serialize;
use std::str::FromStr;

/// A parsed front-end command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play(String),
    PlayRandom,
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist(String),
    AddToPlaylist { playlist: String, video_id: String },
    RemoveFromPlaylist { playlist: String, video_id: String },
    ClearPlaylist(String),
    DeletePlaylist(String),
    ShowPlaylist(String),
    ShowAllPlaylists,
    SearchVideos(String),
    SearchVideosWithTag(String),
    FlagVideo { video_id: String, reason: Option<String> },
    AllowVideo(String),
    History,
    Help,
    Exit,
}

/// Command line that could not be understood
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command} expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

fn arg(
    args: &[&str],
    index: usize,
    command: &'static str,
    expected: &'static str,
) -> Result<String, CommandError> {
    args.get(index)
        .map(|s| s.to_string())
        .ok_or(CommandError::MissingArgument { command, expected })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?.to_uppercase();
        let args: Vec<&str> = words.collect();

        let command = match keyword.as_str() {
            "NUMBER_OF_VIDEOS" => Command::NumberOfVideos,
            "SHOW_ALL_VIDEOS" => Command::ShowAllVideos,
            "PLAY" => Command::Play(arg(&args, 0, "PLAY", "<video_id>")?),
            "PLAY_RANDOM" => Command::PlayRandom,
            "STOP" => Command::Stop,
            "PAUSE" => Command::Pause,
            "CONTINUE" => Command::Continue,
            "SHOW_PLAYING" => Command::ShowPlaying,
            "CREATE_PLAYLIST" => {
                Command::CreatePlaylist(arg(&args, 0, "CREATE_PLAYLIST", "<playlist_name>")?)
            }
            "ADD_TO_PLAYLIST" => Command::AddToPlaylist {
                playlist: arg(&args, 0, "ADD_TO_PLAYLIST", "<playlist_name> <video_id>")?,
                video_id: arg(&args, 1, "ADD_TO_PLAYLIST", "<playlist_name> <video_id>")?,
            },
            "REMOVE_FROM_PLAYLIST" => Command::RemoveFromPlaylist {
                playlist: arg(&args, 0, "REMOVE_FROM_PLAYLIST", "<playlist_name> <video_id>")?,
                video_id: arg(&args, 1, "REMOVE_FROM_PLAYLIST", "<playlist_name> <video_id>")?,
            },
            "CLEAR_PLAYLIST" => {
                Command::ClearPlaylist(arg(&args, 0, "CLEAR_PLAYLIST", "<playlist_name>")?)
            }
            "DELETE_PLAYLIST" => {
                Command::DeletePlaylist(arg(&args, 0, "DELETE_PLAYLIST", "<playlist_name>")?)
            }
            "SHOW_PLAYLIST" => {
                Command::ShowPlaylist(arg(&args, 0, "SHOW_PLAYLIST", "<playlist_name>")?)
            }
            "SHOW_ALL_PLAYLISTS" => Command::ShowAllPlaylists,
            "SEARCH_VIDEOS" => {
                Command::SearchVideos(arg(&args, 0, "SEARCH_VIDEOS", "<search_term>")?)
            }
            "SEARCH_VIDEOS_WITH_TAG" => Command::SearchVideosWithTag(arg(
                &args,
                0,
                "SEARCH_VIDEOS_WITH_TAG",
                "<video_tag>",
            )?),
            "FLAG_VIDEO" => Command::FlagVideo {
                video_id: arg(&args, 0, "FLAG_VIDEO", "<video_id> [flag_reason]")?,
                reason: (args.len() > 1).then(|| args[1..].join(" ")),
            },
            "ALLOW_VIDEO" => Command::AllowVideo(arg(&args, 0, "ALLOW_VIDEO", "<video_id>")?),
            "HISTORY" => Command::History,
            "HELP" => Command::Help,
            "EXIT" => Command::Exit,
            _ => return Err(CommandError::Unknown(keyword)),
        };

        Ok(command)
    }
}

/// Structured result of one command, ready for rendering
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    VideoCount { count: usize },
    Videos { videos: Vec<VideoView> },
    Played { outcome: PlayOutcome },
    Stopped { video: VideoView },
    Paused { video: VideoView },
    Continued { video: VideoView },
    NowPlaying { now: NowPlaying },
    PlaylistCreated { name: String },
    AddedToPlaylist { playlist: String, video: VideoView },
    RemovedFromPlaylist { playlist: String, video: VideoView },
    PlaylistCleared { name: String },
    PlaylistDeleted { name: String },
    Playlists { names: Vec<String> },
    Playlist { name: String, playlist: PlaylistView },
    SearchResults { results: SearchResults },
    Flagged { outcome: FlagOutcome },
    Allowed { video: VideoView },
    History { events: Vec<SessionEventRecord> },
    NoSelection,
    /// Line that did not parse as a command
    Invalid { message: String },
    Help,
    Exit,
    Failed {
        /// Prefix such as `Cannot play video`, absent for self-describing errors
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<String>,
        code: &'static str,
        message: String,
    },
}

impl From<CommandError> for Reply {
    fn from(error: CommandError) -> Self {
        Reply::Invalid { message: error.to_string() }
    }
}

impl Reply {
    fn failed(action: Option<String>, error: Error) -> Self {
        Reply::Failed {
            action,
            code: error.error_code(),
            message: error.to_string(),
        }
    }
}

/// Action prefix used when reporting `error` from `command`
fn action_for(command: &Command, error: &Error) -> Option<String> {
    let action = match (command, error) {
        (_, Error::AlreadyPaused { .. } | Error::NoVideosAvailable) => return None,
        (Command::Play(_) | Command::PlayRandom, _) => "Cannot play video".to_string(),
        (Command::SearchVideos(_) | Command::SearchVideosWithTag(_), _) => {
            "Cannot play video".to_string()
        }
        (Command::Stop, _) => "Cannot stop video".to_string(),
        (Command::Pause, _) => "Cannot pause video".to_string(),
        (Command::Continue, _) => "Cannot continue video".to_string(),
        (Command::CreatePlaylist(_), _) => "Cannot create playlist".to_string(),
        (Command::AddToPlaylist { playlist, .. }, _) => {
            format!("Cannot add video to {}", playlist)
        }
        (Command::RemoveFromPlaylist { playlist, .. }, _) => {
            format!("Cannot remove video from {}", playlist)
        }
        (Command::ClearPlaylist(name), _) => format!("Cannot clear playlist {}", name),
        (Command::DeletePlaylist(name), _) => format!("Cannot delete playlist {}", name),
        (Command::ShowPlaylist(name), _) => format!("Cannot show playlist {}", name),
        (Command::FlagVideo { .. }, _) => "Cannot flag video".to_string(),
        (Command::AllowVideo(_), _) => "Cannot remove flag from video".to_string(),
        _ => return None,
    };
    Some(action)
}

fn reply<T>(
    command: &Command,
    result: reel_core::Result<T>,
    ok: impl FnOnce(T) -> Reply,
) -> Reply {
    match result {
        Ok(value) => ok(value),
        Err(error) => Reply::failed(action_for(command, &error), error),
    }
}

/// Run one command against the session
pub fn execute<R: Rng + ?Sized>(
    session: &mut PlaybackSession,
    command: &Command,
    rng: &mut R,
) -> Reply {
    match command {
        Command::NumberOfVideos => Reply::VideoCount { count: session.number_of_videos() },
        Command::ShowAllVideos => Reply::Videos { videos: session.list_videos() },
        Command::Play(id) => reply(command, session.play(id), |outcome| Reply::Played { outcome }),
        Command::PlayRandom => {
            reply(command, session.play_random(rng), |outcome| Reply::Played { outcome })
        }
        Command::Stop => reply(command, session.stop(), |video| Reply::Stopped { video }),
        Command::Pause => reply(command, session.pause(), |video| Reply::Paused { video }),
        Command::Continue => reply(command, session.resume(), |video| Reply::Continued { video }),
        Command::ShowPlaying => Reply::NowPlaying { now: session.show_playing() },
        Command::CreatePlaylist(name) => reply(command, session.create_playlist(name), |_| {
            Reply::PlaylistCreated { name: name.clone() }
        }),
        Command::AddToPlaylist { playlist, video_id } => {
            reply(command, session.add_to_playlist(playlist, video_id), |video| {
                Reply::AddedToPlaylist { playlist: playlist.clone(), video }
            })
        }
        Command::RemoveFromPlaylist { playlist, video_id } => {
            reply(command, session.remove_from_playlist(playlist, video_id), |video| {
                Reply::RemovedFromPlaylist { playlist: playlist.clone(), video }
            })
        }
        Command::ClearPlaylist(name) => reply(command, session.clear_playlist(name), |_| {
            Reply::PlaylistCleared { name: name.clone() }
        }),
        Command::DeletePlaylist(name) => reply(command, session.delete_playlist(name), |_| {
            Reply::PlaylistDeleted { name: name.clone() }
        }),
        Command::ShowPlaylist(name) => reply(command, session.show_playlist(name), |playlist| {
            Reply::Playlist { name: name.clone(), playlist }
        }),
        Command::ShowAllPlaylists => Reply::Playlists { names: session.list_playlists() },
        Command::SearchVideos(term) => Reply::SearchResults { results: session.search(term) },
        Command::SearchVideosWithTag(tag) => Reply::SearchResults {
            results: session.search_by_tag(tag),
        },
        Command::FlagVideo { video_id, reason } => {
            reply(command, session.flag(video_id, reason.as_deref()), |outcome| {
                Reply::Flagged { outcome }
            })
        }
        Command::AllowVideo(id) => {
            reply(command, session.unflag(id), |video| Reply::Allowed { video })
        }
        Command::History => Reply::History { events: session.events().cloned().collect() },
        Command::Help => Reply::Help,
        Command::Exit => Reply::Exit,
    }
}

/// Act on the answer to the "play one of these?" prompt
pub fn select_result(
    session: &mut PlaybackSession,
    command: &Command,
    results: &SearchResults,
    choice: &str,
) -> Reply {
    match session.play_by_rank(results, choice) {
        Ok(Some(outcome)) => Reply::Played { outcome },
        Ok(None) => Reply::NoSelection,
        Err(error) => Reply::failed(action_for(command, &error), error),
    }
}
