//! User playlists
//!
//! A playlist stores video ids only; the catalog stays the single owner of
//! video records, so flag changes show up in every playlist immediately.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named, ordered, duplicate-free list of video ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    name: String,
    videos: Vec<String>,
}

impl Playlist {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            videos: Vec::new(),
        }
    }

    /// Name with its original casing
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member ids in insertion order
    pub fn videos(&self) -> &[String] {
        &self.videos
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.videos.iter().any(|v| v == video_id)
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Append a video id
    pub fn add_video(&mut self, video_id: &str) -> Result<()> {
        if self.contains(video_id) {
            return Err(Error::AlreadyInPlaylist {
                playlist: self.name.clone(),
                id: video_id.to_string(),
            });
        }
        self.videos.push(video_id.to_string());
        Ok(())
    }

    /// Remove a video id
    pub fn remove_video(&mut self, video_id: &str) -> Result<()> {
        let index = self
            .videos
            .iter()
            .position(|v| v == video_id)
            .ok_or_else(|| Error::VideoNotInPlaylist {
                playlist: self.name.clone(),
                id: video_id.to_string(),
            })?;
        self.videos.remove(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.videos.clear();
    }
}

/// Playlist collection keyed by case-folded name
#[derive(Debug, Clone, Default)]
pub struct Playlists {
    by_key: HashMap<String, Playlist>,
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

impl Playlists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist, rejecting names that differ only in case
    pub fn create(&mut self, name: &str) -> Result<&Playlist> {
        let key = key(name);
        if self.by_key.contains_key(&key) {
            return Err(Error::DuplicatePlaylist { name: name.to_string() });
        }
        Ok(self.by_key.entry(key).or_insert_with(|| Playlist::new(name)))
    }

    pub fn get(&self, name: &str) -> Result<&Playlist> {
        self.by_key
            .get(&key(name))
            .ok_or_else(|| Error::PlaylistNotFound { name: name.to_string() })
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Playlist> {
        self.by_key
            .get_mut(&key(name))
            .ok_or_else(|| Error::PlaylistNotFound { name: name.to_string() })
    }

    /// Remove and return a playlist
    pub fn remove(&mut self, name: &str) -> Result<Playlist> {
        self.by_key
            .remove(&key(name))
            .ok_or_else(|| Error::PlaylistNotFound { name: name.to_string() })
    }

    /// Stored names, sorted case-sensitively
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_key.values().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut playlists = Playlists::new();
        playlists.create("Coding").unwrap();

        let playlist = playlists.get_mut("coding").unwrap();
        playlist.add_video("v1").unwrap();
        playlist.add_video("v2").unwrap();
        assert_eq!(playlist.videos(), ["v1", "v2"]);

        let err = playlist.add_video("v1").unwrap_err();
        assert_eq!(err, Error::AlreadyInPlaylist { playlist: "Coding".into(), id: "v1".into() });

        playlist.remove_video("v1").unwrap();
        assert!(matches!(
            playlist.remove_video("v1"),
            Err(Error::VideoNotInPlaylist { .. })
        ));
        assert_eq!(playlist.videos(), ["v2"]);
    }

    #[test]
    fn test_clear() {
        let mut playlists = Playlists::new();
        let playlist = playlists.create("Mix").unwrap().name().to_string();
        let playlist = playlists.get_mut(&playlist).unwrap();
        playlist.add_video("v1").unwrap();
        playlist.clear();
        assert!(playlist.is_empty());
        playlist.clear();
        assert_eq!(playlist.len(), 0);
    }

    #[test]
    fn test_duplicate_names_case_insensitive() {
        let mut playlists = Playlists::new();
        playlists.create("Coding").unwrap();
        assert_eq!(
            playlists.create("coding").unwrap_err(),
            Error::DuplicatePlaylist { name: "coding".into() }
        );
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists.get("CODING").unwrap().name(), "Coding");
    }

    #[test]
    fn test_names_sorted_case_sensitive() {
        let mut playlists = Playlists::new();
        for name in ["beta", "Alpha", "Gamma"] {
            playlists.create(name).unwrap();
        }
        assert_eq!(playlists.names(), ["Alpha", "Gamma", "beta"]);
    }

    #[test]
    fn test_remove_missing() {
        let mut playlists = Playlists::new();
        assert!(playlists.is_empty());
        assert!(matches!(playlists.remove("nope"), Err(Error::PlaylistNotFound { .. })));
        playlists.create("Here").unwrap();
        assert_eq!(playlists.remove("HERE").unwrap().name(), "Here");
        assert!(playlists.get("here").is_err());
    }
}
