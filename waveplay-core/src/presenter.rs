//! Presentation layer contract.
//!
//! The player never draws anything itself. It pushes state changes into a
//! [`Presenter`] and reads back the few layout facts it needs (waveform
//! geometry, lyric line offsets, the viewport's scroll position).

use crate::lyrics::LyricLine;
use crate::scroll::FrameTicket;
use crate::seek::WaveformLayout;

/// Which glyph the play/pause button shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    /// Playback is paused; pressing the button plays
    Play,
    /// Playback is running; pressing the button pauses
    Pause,
}

/// Track details shown in the player header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub thumbnail: String,
    pub title: String,
    pub artist: String,
}

pub trait Presenter {
    /// Draw a fresh waveform; every bar starts unplayed
    fn render_waveform(&mut self, heights: &[f32]);

    fn set_bar_active(&mut self, index: usize, active: bool);

    /// Current geometry of the waveform container
    fn waveform_layout(&self) -> WaveformLayout;

    fn set_time_display(&mut self, text: &str);

    fn set_now_playing(&mut self, now_playing: &NowPlaying);

    fn set_play_icon(&mut self, icon: PlayIcon);

    /// Replace the lyrics panel content; every line starts inactive
    fn render_lyrics(&mut self, lines: &[LyricLine]);

    fn set_lyric_active(&mut self, index: usize, active: bool);

    /// Vertical offset of a rendered lyric line inside the lyrics viewport
    fn lyric_line_offset(&self, index: usize) -> f64;

    fn lyrics_scroll_offset(&self) -> f64;

    fn set_lyrics_scroll_offset(&mut self, offset: f64);

    /// Schedule a call to [`Player::on_animation_frame`](crate::Player::on_animation_frame)
    /// with `ticket` at the next paint opportunity
    fn request_animation_frame(&mut self, ticket: FrameTicket);

    /// Show a playlist row's duration label
    fn set_track_duration_label(&mut self, index: usize, text: &str);

    /// Show or hide a playlist row
    fn set_track_visible(&mut self, index: usize, visible: bool);
}
