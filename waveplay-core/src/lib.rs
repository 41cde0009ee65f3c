pub mod config;
pub mod error;
pub mod lrc;
pub mod lyrics;
pub mod navigator;
pub mod paths;
pub mod playback;
pub mod player;
pub mod playlist;
pub mod presenter;
pub mod scroll;
pub mod seek;
pub mod time;
pub mod waveform;

pub use config::{
    HostConfig, LoggingConfig, LyricsConfig, PlaylistConfig, WaveformConfig, WaveplayConfig,
};

pub use error::CoreError;
pub use lrc::{LrcFile, LrcMetadata};
pub use lyrics::{active_line_index, LineChange, LyricLine, LyricsSync};
pub use navigator::TrackNavigator;
pub use paths::{
    config_dir, log_file_path, playlist_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME,
    PLAYLIST_FILE_NAME,
};
pub use playback::{MediaElement, PlaybackState};
pub use player::{Player, PlayerOptions};
pub use playlist::{Playlist, Track};
pub use presenter::{NowPlaying, PlayIcon, Presenter};
pub use scroll::{ease_in_out_quad, FrameStep, FrameTicket, ScrollAnimator};
pub use seek::{seek_fraction, SeekGesture, WaveformLayout};
pub use time::{format_progress, format_time};
pub use waveform::{active_bar_count, BarChange, HeightRange, Waveform};
