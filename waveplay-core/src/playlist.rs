//! Playlist model and the TOML playlist file.
//!
//! ```toml
//! [[tracks]]
//! source = "media/night-drive.mp3"
//! thumbnail = "covers/night-drive.jpg"
//! title = "Night Drive"
//! artist = "Neon Coast"
//! lrc = "lyrics/night-drive.lrc"
//!
//! [[tracks]]
//! source = "media/tides.mp3"
//! title = "Tides"
//! artist = "Harbor Lights"
//! lyrics = [
//!     { time = 0.0, text = "Waves roll in" },
//!     { time = 4.5, text = "and pull away" },
//! ]
//! ```
//!
//! Lyric paths are resolved relative to the playlist file. Inline lyric
//! lines must be in ascending time order.

use crate::error::{CoreError, Result};
use crate::lrc::LrcFile;
use crate::lyrics::LyricLine;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const LOG_TARGET: &str = "waveplay::playlist";

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A playable track and its synced lyrics
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Media locator handed to the media element
    pub source: String,
    /// Cover art locator
    pub thumbnail: String,
    pub title: String,
    pub artist: String,
    /// Duration in seconds, known once the track's metadata has loaded
    pub duration: Option<f64>,
    /// Lines in ascending time order
    pub lyrics: Vec<LyricLine>,
}

impl Track {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            thumbnail: String::new(),
            title: title.into(),
            artist: artist.into(),
            duration: None,
            lyrics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    #[must_use]
    pub fn with_lyrics(mut self, lyrics: Vec<LyricLine>) -> Self {
        self.lyrics = lyrics;
        self
    }

    /// Title to display, falling back to a placeholder when blank
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_blank_or(&self.title, UNKNOWN_TITLE)
    }

    /// Artist to display, falling back to a placeholder when blank
    #[must_use]
    pub fn display_artist(&self) -> &str {
        non_blank_or(&self.artist, UNKNOWN_ARTIST)
    }

    /// Case-insensitive substring match on title or artist.
    /// An empty term matches every track.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.artist.to_lowercase().contains(&term)
    }

    fn lyrics_sorted(&self) -> bool {
        self.lyrics.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Fixed, non-empty, ordered list of tracks
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PlaylistEmpty`] if `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::PlaylistEmpty);
        }

        for (index, track) in tracks.iter().enumerate() {
            if !track.lyrics_sorted() {
                warn!(
                    target: LOG_TARGET,
                    "Lyrics of track #{} ({}) are not in ascending time order",
                    index,
                    track.display_title()
                );
            }
        }

        Ok(Self { tracks })
    }

    /// Load a playlist file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, has no
    /// tracks, or has an invalid entry.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let file: PlaylistFile =
            toml::from_str(&content).map_err(|source| CoreError::PlaylistParseError {
                path: path.to_path_buf(),
                source,
            })?;

        let playlist = Self::from_entries(file.tracks, base_dir)?;
        info!(target: LOG_TARGET, "Loaded {} track(s) from {}", playlist.len(), path.display());
        Ok(playlist)
    }

    /// Parse playlist TOML, resolving lyric files against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, has no tracks, or has
    /// an invalid entry.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let file: PlaylistFile =
            toml::from_str(content).map_err(|source| CoreError::PlaylistParseError {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        Self::from_entries(file.tracks, base_dir)
    }

    fn from_entries(entries: Vec<TrackEntry>, base_dir: &Path) -> Result<Self> {
        let tracks = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_track(index, base_dir))
            .collect::<Result<Vec<_>>>()?;
        Self::new(tracks)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Never true for a constructed playlist
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Record a track's duration once its metadata has loaded.
    /// Returns `false` if `index` is out of range.
    pub fn set_duration(&mut self, index: usize, duration: f64) -> bool {
        match self.tracks.get_mut(index) {
            Some(track) => {
                track.duration = Some(duration);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    source: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    lyrics: Vec<LyricLine>,
    lrc: Option<PathBuf>,
}

impl TrackEntry {
    fn into_track(self, index: usize, base_dir: &Path) -> Result<Track> {
        if self.source.trim().is_empty() {
            return Err(CoreError::PlaylistInvalid {
                index,
                reason: "source is empty".to_string(),
            });
        }
        if !self.lyrics.is_empty() && self.lrc.is_some() {
            return Err(CoreError::PlaylistInvalid {
                index,
                reason: "both inline lyrics and an lrc file are given".to_string(),
            });
        }
        if let Some(line) = self.lyrics.iter().find(|line| !line.time.is_finite()) {
            return Err(CoreError::PlaylistInvalid {
                index,
                reason: format!("lyric line {:?} has a non-finite time", line.text),
            });
        }

        let lyrics = match self.lrc {
            Some(lrc) => load_lrc_lines(&base_dir.join(lrc)),
            None => self.lyrics,
        };

        Ok(Track {
            source: self.source,
            thumbnail: self.thumbnail,
            title: self.title,
            artist: self.artist,
            duration: None,
            lyrics,
        })
    }
}

/// Missing or broken lyric files leave the track without lyrics
fn load_lrc_lines(path: &Path) -> Vec<LyricLine> {
    let parsed = fs::read_to_string(path)
        .map_err(CoreError::from)
        .and_then(|content| LrcFile::parse(&content));

    match parsed {
        Ok(lrc) => lrc.lines,
        Err(e) => {
            warn!(target: LOG_TARGET, "Ignoring lyrics file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
