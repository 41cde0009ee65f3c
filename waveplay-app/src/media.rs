//! A media element backed by a wall clock instead of a decoder.
//!
//! Track lengths come from the optional `length_secs` key of each playlist
//! entry. A source without a known length plays forever with an unknown
//! duration, like a live stream.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use waveplay_core::error::{CoreError, Result};
use waveplay_core::MediaElement;

/// Notifications produced by one clock advance, in delivery order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaTick {
    pub metadata_ready: bool,
    pub time_advanced: bool,
    pub ended: bool,
}

#[derive(Debug)]
pub struct SimulatedMedia {
    lengths: HashMap<String, f64>,
    source: Option<String>,
    position: f64,
    duration: f64,
    paused: bool,
    metadata_pending: bool,
    seek_pending: bool,
}

impl SimulatedMedia {
    pub fn new(lengths: HashMap<String, f64>) -> Self {
        Self {
            lengths,
            source: None,
            position: 0.0,
            duration: f64::NAN,
            paused: true,
            metadata_pending: false,
            seek_pending: false,
        }
    }

    /// Known length of `source`, used to probe playlist rows
    pub fn length_of(&self, source: &str) -> Option<f64> {
        self.lengths.get(source).copied()
    }

    /// Move the clock forward by `elapsed`.
    ///
    /// Metadata for a freshly set source arrives on the first advance after
    /// it was set, whether or not the media is playing. A seek is reported
    /// as a time advance on the next call even while paused.
    pub fn advance(&mut self, elapsed: Duration) -> MediaTick {
        let mut tick = MediaTick::default();

        if self.metadata_pending {
            self.metadata_pending = false;
            if let Some(length) = self.source.as_deref().and_then(|s| self.length_of(s)) {
                self.duration = length;
                tick.metadata_ready = true;
            }
        }

        tick.time_advanced = std::mem::take(&mut self.seek_pending);

        if self.paused || self.source.is_none() {
            return tick;
        }

        self.position += elapsed.as_secs_f64();
        tick.time_advanced = true;

        if self.duration.is_finite() && self.position >= self.duration {
            self.position = self.duration;
            self.paused = true;
            tick.ended = true;
        }
        tick
    }
}

impl MediaElement for SimulatedMedia {
    fn set_source(&mut self, locator: &str) {
        self.source = Some(locator.to_string());
        self.position = 0.0;
        self.duration = f64::NAN;
        self.paused = true;
        self.metadata_pending = true;
        self.seek_pending = false;
    }

    fn play(&mut self) {
        if self.source.is_none() {
            return;
        }
        // Playing an ended track starts it over
        if self.duration.is_finite() && self.position >= self.duration {
            self.position = 0.0;
        }
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        let upper = if self.duration.is_finite() {
            self.duration
        } else {
            f64::MAX
        };
        self.position = if seconds.is_finite() {
            seconds.clamp(0.0, upper)
        } else {
            0.0
        };
        self.seek_pending = self.source.is_some();
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

#[derive(Debug, Deserialize)]
struct LengthsFile {
    #[serde(default)]
    tracks: Vec<LengthEntry>,
}

#[derive(Debug, Deserialize)]
struct LengthEntry {
    source: String,
    length_secs: Option<f64>,
}

/// Read the `length_secs` of every playlist entry that has one
///
/// # Errors
///
/// Returns an error if the playlist file cannot be read or parsed.
pub fn load_lengths(playlist_path: &Path) -> Result<HashMap<String, f64>> {
    let content = fs::read_to_string(playlist_path)?;
    lengths_from_toml_str(&content, playlist_path)
}

fn lengths_from_toml_str(content: &str, path: &Path) -> Result<HashMap<String, f64>> {
    let file: LengthsFile = toml::from_str(content).map_err(|source| CoreError::PlaylistParseError {
        path: PathBuf::from(path),
        source,
    })?;

    Ok(file
        .tracks
        .into_iter()
        .filter_map(|entry| {
            let length = entry.length_secs.filter(|l| l.is_finite() && *l > 0.0)?;
            Some((entry.source, length))
        })
        .collect())
}
