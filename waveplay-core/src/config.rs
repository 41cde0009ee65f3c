use crate::error::{CoreError, Result};
use crate::seek::WaveformLayout;
use crate::waveform::{HeightRange, DEFAULT_BAR_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveplayConfig {
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub waveform: WaveformConfig,
    #[serde(default)]
    pub lyrics: LyricsConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Playlist file; defaults to playlist.toml in the config directory
    pub path: Option<PathBuf>,
}

impl PlaylistConfig {
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(crate::paths::playlist_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformConfig {
    #[serde(default = "default_bar_count")]
    pub bar_count: usize,
    #[serde(default = "default_min_bar_height")]
    pub min_bar_height: f32,
    #[serde(default = "default_max_bar_height")]
    pub max_bar_height: f32,
    /// Rendered bar width, used by hosts that lay the waveform out themselves
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    #[serde(default = "default_bar_gap")]
    pub bar_gap: f64,
    /// Width of the waveform container
    #[serde(default = "default_waveform_width")]
    pub width: f64,
}

const fn default_bar_count() -> usize {
    DEFAULT_BAR_COUNT
}

const fn default_min_bar_height() -> f32 {
    10.0
}

const fn default_max_bar_height() -> f32 {
    40.0
}

const fn default_bar_width() -> f64 {
    4.0
}

const fn default_bar_gap() -> f64 {
    2.0
}

const fn default_waveform_width() -> f64 {
    600.0
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            bar_count: default_bar_count(),
            min_bar_height: default_min_bar_height(),
            max_bar_height: default_max_bar_height(),
            bar_width: default_bar_width(),
            bar_gap: default_bar_gap(),
            width: default_waveform_width(),
        }
    }
}

impl WaveformConfig {
    #[must_use]
    pub const fn height_range(&self) -> HeightRange {
        HeightRange {
            min: self.min_bar_height,
            max: self.max_bar_height,
        }
    }

    /// Container geometry with the left edge at `left`
    #[must_use]
    pub const fn layout(&self, left: f64) -> WaveformLayout {
        WaveformLayout {
            left,
            width: self.width,
            bar_width: self.bar_width,
            gap: self.bar_gap,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    #[serde(default = "default_scroll_duration_ms")]
    pub scroll_duration_ms: u64,
    /// Height of one rendered lyric line
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

const fn default_scroll_duration_ms() -> u64 {
    400
}

const fn default_line_height() -> f64 {
    32.0
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            scroll_duration_ms: default_scroll_duration_ms(),
            line_height: default_line_height(),
        }
    }
}

impl LyricsConfig {
    #[must_use]
    pub const fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// How often the media element reports a new position
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Paint interval for animation frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

const fn default_tick_interval() -> u64 {
    250
}

const fn default_frame_interval() -> u64 {
    16
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to ~/.config/waveplay/waveplay.log
    #[serde(default)]
    pub enabled: bool,
}

impl WaveplayConfig {
    /// Get the configuration directory path (~/.config/waveplay/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/waveplay/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file or create template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template on
    /// first run, or an error if the file cannot be read, parsed or validated.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&config_path, CONFIG_TEMPLATE)?;

            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        Self::load_from(&config_path)
    }

    /// Load and validate config from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        let waveform = &self.waveform;
        let heights_ordered = waveform.min_bar_height < waveform.max_bar_height;

        if waveform.bar_count == 0 {
            return invalid("waveform.bar_count must be at least 1");
        }
        if !(waveform.min_bar_height.is_finite() && waveform.max_bar_height.is_finite()) {
            return invalid("waveform bar heights must be finite");
        }
        if !heights_ordered {
            return invalid("waveform.min_bar_height must be below waveform.max_bar_height");
        }
        if waveform.bar_width < 0.0 || waveform.bar_gap < 0.0 {
            return invalid("waveform.bar_width and waveform.bar_gap must not be negative");
        }
        if self.host.tick_interval_ms == 0 || self.host.frame_interval_ms == 0 {
            return invalid("host intervals must be positive");
        }
        if let Some(path) = &self.playlist.path {
            if path.as_os_str().is_empty() {
                return Err(CoreError::ConfigMissingField {
                    field: "playlist.path".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Result<()> {
    Err(CoreError::ConfigInvalid {
        message: message.to_string(),
    })
}

const CONFIG_TEMPLATE: &str = r##"# Waveplay Configuration
# ~/.config/waveplay/config.toml

[playlist]
# Playlist file (TOML). Defaults to ~/.config/waveplay/playlist.toml
# path = "/home/me/music/playlist.toml"

[waveform]
bar_count = 90
# Bar heights are sampled uniformly from [min_bar_height, max_bar_height)
min_bar_height = 10
max_bar_height = 40
bar_width = 4
bar_gap = 2
width = 600

[lyrics]
scroll_duration_ms = 400
line_height = 32

[host]
tick_interval_ms = 250
frame_interval_ms = 16

[logging]
# Also write logs to ~/.config/waveplay/waveplay.log
enabled = false
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let config = WaveplayConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        let defaults = WaveplayConfig::default();

        assert_eq!(config.waveform.bar_count, defaults.waveform.bar_count);
        assert!((config.waveform.width - defaults.waveform.width).abs() < f64::EPSILON);
        assert_eq!(config.lyrics.scroll_duration_ms, defaults.lyrics.scroll_duration_ms);
        assert_eq!(config.host.tick_interval_ms, defaults.host.tick_interval_ms);
        assert!(!config.logging.enabled);
        assert!(config.playlist.path.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = WaveplayConfig::from_toml_str("").unwrap();
        assert_eq!(config.waveform.bar_count, 90);
        assert_eq!(config.waveform.height_range(), HeightRange::default());
        assert_eq!(config.lyrics.scroll_duration(), Duration::from_millis(400));
        assert_eq!(config.host.frame_interval_ms, 16);
    }

    #[test]
    fn test_partial_section() {
        let config = WaveplayConfig::from_toml_str("[waveform]\nbar_count = 40\n").unwrap();
        assert_eq!(config.waveform.bar_count, 40);
        assert!((config.waveform.bar_gap - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_bars_rejected() {
        let err = WaveplayConfig::from_toml_str("[waveform]\nbar_count = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_inverted_height_range_rejected() {
        let err = WaveplayConfig::from_toml_str("[waveform]\nmin_bar_height = 50\nmax_bar_height = 40\n")
            .unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_infinite_bar_height_rejected() {
        let err = WaveplayConfig::from_toml_str("[waveform]\nmax_bar_height = inf\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));

        let err = WaveplayConfig::from_toml_str("[waveform]\nmin_bar_height = nan\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = WaveplayConfig::from_toml_str("[host]\ntick_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_empty_playlist_path_rejected() {
        let err = WaveplayConfig::from_toml_str("[playlist]\npath = \"\"\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigMissingField { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = WaveplayConfig::from_toml_str("[waveform\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParseError(_)));
    }

    #[test]
    fn test_layout_from_config() {
        let layout = WaveformConfig::default().layout(12.0);
        assert!((layout.left - 12.0).abs() < f64::EPSILON);
        assert!((layout.bars_width(90) - 538.0).abs() < 1e-9);
    }

    #[test]
    fn test_playlist_path_override() {
        let config = WaveplayConfig::from_toml_str("[playlist]\npath = \"/tmp/list.toml\"\n").unwrap();
        assert_eq!(config.playlist.resolved_path(), PathBuf::from("/tmp/list.toml"));
    }
}
