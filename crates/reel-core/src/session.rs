//! Playback Session - Main orchestrator for browsing
//!
//! Coordinates:
//! - The playback state machine (idle / playing / paused)
//! - Flag-based visibility rules over the catalog
//! - Search with ranked follow-up selection
//! - Playlist management
//! - Session events

use crate::{
    catalog::{VideoCatalog, VideoLibrary},
    events::{EventLog, SessionEvent, SessionEventRecord},
    playlist::Playlists,
    types::*,
    Error, Result,
};
use rand::{seq::IndexedRandom, Rng};
use tracing::{debug, info, instrument};

/// Playback session owning the catalog, the playback state and all playlists
#[derive(Debug)]
pub struct PlaybackSession<C: VideoCatalog = VideoLibrary> {
    /// Unique session ID
    id: SessionId,
    /// Session configuration
    config: SessionConfig,
    /// Video records, flag state included
    catalog: C,
    /// Current playback state
    state: PlaybackState,
    /// User playlists
    playlists: Playlists,
    /// State change history
    events: EventLog,
}

impl<C: VideoCatalog> PlaybackSession<C> {
    /// Create a new session over a catalog
    pub fn new(catalog: C, config: SessionConfig) -> Self {
        let id = SessionId::new();
        let events = EventLog::new(id, config.max_event_history, config.record_events);

        info!(session_id = %id, "Session created");

        Self {
            id,
            config,
            catalog,
            state: PlaybackState::Idle,
            playlists: Playlists::new(),
            events,
        }
    }

    /// Get session ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Get current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn playlists(&self) -> &Playlists {
        &self.playlists
    }

    /// Recorded state changes, oldest first
    pub fn events(&self) -> impl Iterator<Item = &SessionEventRecord> {
        self.events.records()
    }

    pub fn number_of_videos(&self) -> usize {
        self.catalog.all().len()
    }

    /// Every catalog video, flagged ones annotated, sorted by display string
    pub fn list_videos(&self) -> Vec<VideoView> {
        let mut videos: Vec<VideoView> =
            self.catalog.all().into_iter().map(VideoView::from).collect();
        videos.sort_by_cached_key(|v| v.to_string());
        videos
    }

    /// Start playing a video, stopping whatever was playing
    #[instrument(skip(self))]
    pub fn play(&mut self, id: &str) -> Result<PlayOutcome> {
        let video = self
            .catalog
            .lookup(id)
            .ok_or_else(|| Error::VideoNotFound { id: id.to_string() })?;

        if let Some(reason) = video.flag() {
            return Err(Error::VideoFlagged {
                id: id.to_string(),
                reason: reason.to_string(),
            });
        }

        let playing = VideoView::from(video);
        let stopped = self.stop_current();

        self.state = PlaybackState::Playing {
            video_id: id.to_string(),
            paused: false,
        };
        self.events.record(SessionEvent::Play { video_id: id.to_string() });

        info!(video_id = id, title = %playing.title, "Playing video");

        Ok(PlayOutcome { stopped, playing })
    }

    /// Stop the current video
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> Result<VideoView> {
        self.stop_current().ok_or(Error::NothingPlaying)
    }

    /// Play a uniformly chosen unflagged video
    #[instrument(skip(self, rng))]
    pub fn play_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PlayOutcome> {
        // Sorted so a seeded rng picks the same video regardless of catalog order
        let mut candidates: Vec<String> = self
            .catalog
            .all()
            .into_iter()
            .filter(|v| !v.is_flagged())
            .map(|v| v.id().to_string())
            .collect();
        candidates.sort();

        let id = candidates.choose(rng).ok_or(Error::NoVideosAvailable)?.clone();
        debug!(video_id = %id, candidates = candidates.len(), "Random pick");

        self.play(&id)
    }

    /// Pause the current video
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> Result<VideoView> {
        let (video, paused) = self.current().ok_or(Error::NothingPlaying)?;
        if paused {
            return Err(Error::AlreadyPaused { title: video.title });
        }

        self.set_paused(true);
        self.events.record(SessionEvent::Pause { video_id: video.id.clone() });
        info!(video_id = %video.id, state = %self.state, "Paused");

        Ok(video)
    }

    /// Resume the paused video
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Result<VideoView> {
        let (video, paused) = self.current().ok_or(Error::NothingPlaying)?;
        if !paused {
            return Err(Error::NotPaused { title: video.title });
        }

        self.set_paused(false);
        self.events.record(SessionEvent::Resume { video_id: video.id.clone() });
        info!(video_id = %video.id, state = %self.state, "Resumed");

        Ok(video)
    }

    pub fn show_playing(&self) -> NowPlaying {
        match self.current() {
            Some((video, paused)) => NowPlaying::Playing { video, paused },
            None => NowPlaying::Idle,
        }
    }

    /// Unflagged videos whose title contains `term`, case-insensitively
    pub fn search(&self, term: &str) -> SearchResults {
        self.ranked(term, |v| v.title_contains(term))
    }

    /// Unflagged videos carrying `tag`, case-insensitively
    pub fn search_by_tag(&self, tag: &str) -> SearchResults {
        self.ranked(tag, |v| v.has_tag(tag))
    }

    /// Play the search result at a 1-based rank given as text.
    ///
    /// A choice that is not a bare digit string, or is out of range, plays
    /// nothing and returns `Ok(None)`.
    #[instrument(skip(self, results))]
    pub fn play_by_rank(
        &mut self,
        results: &SearchResults,
        choice: &str,
    ) -> Result<Option<PlayOutcome>> {
        match results.select(choice) {
            Some(video) => {
                let id = video.id.clone();
                self.play(&id).map(Some)
            }
            None => {
                debug!(choice, results = results.len(), "No result selected");
                Ok(None)
            }
        }
    }

    /// Flag a video. An empty or missing reason uses the configured default.
    #[instrument(skip(self))]
    pub fn flag(&mut self, id: &str, reason: Option<&str>) -> Result<FlagOutcome> {
        let video = self
            .catalog
            .lookup(id)
            .ok_or_else(|| Error::VideoNotFound { id: id.to_string() })?;
        if video.is_flagged() {
            return Err(Error::AlreadyFlagged { id: id.to_string() });
        }

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from)
            .unwrap_or_else(|| self.config.default_flag_reason.clone());

        let stopped = if self.state.video_id() == Some(id) {
            self.stop_current()
        } else {
            None
        };

        let video = self
            .catalog
            .lookup_mut(id)
            .ok_or_else(|| Error::VideoNotFound { id: id.to_string() })?;
        video.set_flag(Some(reason.clone()));
        let video = VideoView::from(&*video);

        self.events.record(SessionEvent::Flag {
            video_id: id.to_string(),
            reason: reason.clone(),
        });
        info!(video_id = id, reason = %reason, "Video flagged");

        Ok(FlagOutcome { stopped, video, reason })
    }

    /// Clear a video's flag
    #[instrument(skip(self))]
    pub fn unflag(&mut self, id: &str) -> Result<VideoView> {
        let video = self
            .catalog
            .lookup_mut(id)
            .ok_or_else(|| Error::VideoNotFound { id: id.to_string() })?;
        if !video.is_flagged() {
            return Err(Error::NotFlagged { id: id.to_string() });
        }

        video.set_flag(None);
        let video = VideoView::from(&*video);

        self.events.record(SessionEvent::Unflag { video_id: id.to_string() });
        info!(video_id = id, "Flag removed");

        Ok(video)
    }

    /// Create an empty playlist; returns the stored name
    #[instrument(skip(self))]
    pub fn create_playlist(&mut self, name: &str) -> Result<String> {
        let name = self.playlists.create(name)?.name().to_string();
        info!(playlist = %name, "Playlist created");
        Ok(name)
    }

    /// Delete a playlist; returns the stored name.
    ///
    /// Playback is unaffected even if the playing video was in it.
    #[instrument(skip(self))]
    pub fn delete_playlist(&mut self, name: &str) -> Result<String> {
        let playlist = self.playlists.remove(name)?;
        info!(playlist = %playlist.name(), "Playlist deleted");
        Ok(playlist.name().to_string())
    }

    /// Remove every video from a playlist; returns the stored name
    #[instrument(skip(self))]
    pub fn clear_playlist(&mut self, name: &str) -> Result<String> {
        let playlist = self.playlists.get_mut(name)?;
        playlist.clear();
        Ok(playlist.name().to_string())
    }

    /// Playlist names in display order
    pub fn list_playlists(&self) -> Vec<String> {
        self.playlists.names()
    }

    /// Playlist contents; flagged members are annotated, not hidden
    pub fn show_playlist(&self, name: &str) -> Result<PlaylistView> {
        let playlist = self.playlists.get(name)?;
        let videos = playlist
            .videos()
            .iter()
            .filter_map(|id| self.catalog.lookup(id))
            .map(VideoView::from)
            .collect();

        Ok(PlaylistView {
            name: playlist.name().to_string(),
            videos,
        })
    }

    /// Append a video to a playlist
    #[instrument(skip(self))]
    pub fn add_to_playlist(&mut self, name: &str, id: &str) -> Result<VideoView> {
        self.playlists.get(name)?;

        let video = self
            .catalog
            .lookup(id)
            .ok_or_else(|| Error::VideoNotFound { id: id.to_string() })?;
        if let Some(reason) = video.flag() {
            return Err(Error::VideoFlagged {
                id: id.to_string(),
                reason: reason.to_string(),
            });
        }
        let video = VideoView::from(video);

        self.playlists.get_mut(name)?.add_video(id)?;
        info!(playlist = name, video_id = id, "Added to playlist");

        Ok(video)
    }

    /// Remove a video from a playlist.
    ///
    /// Playback is unaffected even if the removed video is playing.
    #[instrument(skip(self))]
    pub fn remove_from_playlist(&mut self, name: &str, id: &str) -> Result<VideoView> {
        self.playlists.get(name)?;

        let video = self
            .catalog
            .lookup(id)
            .map(VideoView::from)
            .ok_or_else(|| Error::VideoNotFound { id: id.to_string() })?;

        self.playlists.get_mut(name)?.remove_video(id)?;
        info!(playlist = name, video_id = id, "Removed from playlist");

        Ok(video)
    }

    /// Current video and its pause flag
    fn current(&self) -> Option<(VideoView, bool)> {
        match &self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing { video_id, paused } => self
                .catalog
                .lookup(video_id)
                .map(|v| (VideoView::from(v), *paused)),
        }
    }

    fn set_paused(&mut self, value: bool) {
        if let PlaybackState::Playing { paused, .. } = &mut self.state {
            *paused = value;
        }
    }

    /// Force the state to idle, returning the video that was playing
    fn stop_current(&mut self) -> Option<VideoView> {
        let video_id = match std::mem::take(&mut self.state) {
            PlaybackState::Idle => return None,
            PlaybackState::Playing { video_id, .. } => video_id,
        };

        self.events.record(SessionEvent::Stop { video_id: video_id.clone() });
        info!(video_id = %video_id, "Stopping video");

        self.catalog.lookup(&video_id).map(VideoView::from)
    }

    fn ranked(&self, query: &str, matches: impl Fn(&Video) -> bool) -> SearchResults {
        let mut entries: Vec<VideoView> = self
            .catalog
            .all()
            .into_iter()
            .filter(|v| !v.is_flagged() && matches(*v))
            .map(VideoView::from)
            .collect();
        entries.sort_by_cached_key(|v| v.to_string());

        debug!(query, matches = entries.len(), "Search");

        SearchResults {
            query: query.to_string(),
            entries,
        }
    }
}
