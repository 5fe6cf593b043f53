//! Video catalog
//!
//! The session only needs id lookup, full enumeration and in-place flag
//! mutation, so those are the whole `VideoCatalog` contract. `VideoLibrary`
//! is the in-memory implementation, seeded from a pipe-separated listing:
//!
//! ```text
//! Amazing Cats | amazing_cats_video_id | #cat , #animal
//! Video about nothing | nothing_video_id |
//! ```

use crate::{Error, Result, Video};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Seed list compiled into the crate
const BUNDLED_CATALOG: &str = include_str!("../data/videos.txt");

/// Read-mostly registry of videos consumed by the session
pub trait VideoCatalog {
    /// Look up a video by id
    fn lookup(&self, id: &str) -> Option<&Video>;

    /// Mutable lookup, used only to change flag state
    fn lookup_mut(&mut self, id: &str) -> Option<&mut Video>;

    /// Every video, in no particular order
    fn all(&self) -> Vec<&Video>;
}

/// In-memory catalog keyed by video id
#[derive(Debug, Clone, Default)]
pub struct VideoLibrary {
    videos: HashMap<String, Video>,
}

impl VideoLibrary {
    /// Build a library from records; a repeated id keeps the last record
    pub fn new(videos: impl IntoIterator<Item = Video>) -> Self {
        let videos = videos
            .into_iter()
            .map(|v| (v.id().to_string(), v))
            .collect();
        Self { videos }
    }

    /// The default seed list
    pub fn bundled() -> Self {
        // Parsed by test_bundled_catalog
        Self::parse(BUNDLED_CATALOG).unwrap_or_default()
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let library = Self::parse(&text)?;
        info!(path = %path.display(), videos = library.len(), "Catalog loaded");
        Ok(library)
    }

    /// Parse `Title | id | #tag , #tag` lines
    pub fn parse(text: &str) -> Result<Self> {
        let mut videos = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            videos.push(parse_line(line, index + 1)?);
        }

        debug!(count = videos.len(), "Parsed catalog entries");
        Ok(Self::new(videos))
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

impl VideoCatalog for VideoLibrary {
    fn lookup(&self, id: &str) -> Option<&Video> {
        self.videos.get(id)
    }

    fn lookup_mut(&mut self, id: &str) -> Option<&mut Video> {
        self.videos.get_mut(id)
    }

    fn all(&self) -> Vec<&Video> {
        self.videos.values().collect()
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<Video> {
    let mut fields = line.split('|').map(str::trim);

    let title = fields.next().unwrap_or_default();
    let id = fields.next().ok_or_else(|| Error::CatalogParse {
        line: line_no,
        reason: "expected `title | id | tags`".to_string(),
    })?;

    if title.is_empty() {
        return Err(Error::CatalogParse {
            line: line_no,
            reason: "empty title".to_string(),
        });
    }
    if id.is_empty() {
        return Err(Error::CatalogParse {
            line: line_no,
            reason: "empty id".to_string(),
        });
    }

    let tags = fields
        .next()
        .map(|column| {
            column
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(Video::new(id, title, tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_catalog() {
        let parsed = VideoLibrary::parse(BUNDLED_CATALOG).unwrap();
        assert_eq!(parsed.len(), 5);

        let library = VideoLibrary::bundled();
        assert_eq!(library.len(), 5);

        let cats = library.lookup("amazing_cats_video_id").unwrap();
        assert_eq!(cats.title(), "Amazing Cats");
        assert_eq!(cats.tags(), ["#cat", "#animal"]);
        assert!(!cats.is_flagged());

        let nothing = library.lookup("nothing_video_id").unwrap();
        assert!(nothing.tags().is_empty());
    }

    #[test]
    fn test_parse_optional_tag_column() {
        let library = VideoLibrary::parse("Untagged | u1\n\n  \nTagged | t1 | a, ,b\n").unwrap();
        assert_eq!(library.len(), 2);
        assert!(library.lookup("u1").unwrap().tags().is_empty());
        assert_eq!(library.lookup("t1").unwrap().tags(), ["a", "b"]);
    }

    #[test]
    fn test_parse_errors() {
        let err = VideoLibrary::parse("Good | g1\nmissing separator").unwrap_err();
        assert_eq!(
            err,
            Error::CatalogParse {
                line: 2,
                reason: "expected `title | id | tags`".into()
            }
        );

        let err = VideoLibrary::parse(" | id").unwrap_err();
        assert!(matches!(err, Error::CatalogParse { line: 1, .. }));

        let err = VideoLibrary::parse("Title |  | #tag").unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_PARSE");
    }

    #[test]
    fn test_duplicate_ids_keep_last() {
        let library = VideoLibrary::parse("First | dup\nSecond | dup").unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.lookup("dup").unwrap().title(), "Second");
    }

    #[test]
    fn test_lookup_mut_changes_flag() {
        let mut library = VideoLibrary::bundled();
        library
            .lookup_mut("funny_dogs_video_id")
            .unwrap()
            .set_flag(Some("spam".into()));
        assert_eq!(library.lookup("funny_dogs_video_id").unwrap().flag(), Some("spam"));
        assert!(library.lookup("missing").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Cooking 101 | cook_1 | #food").unwrap();
        writeln!(file, "Cooking 102 | cook_2 | #food , #howto").unwrap();

        let library = VideoLibrary::load(file.path()).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.all().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = VideoLibrary::load(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
