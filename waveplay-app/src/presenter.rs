//! Headless presenter that keeps a model of the view and logs changes.

use tracing::{debug, info};
use waveplay_core::{FrameTicket, LyricLine, NowPlaying, PlayIcon, Presenter, WaveformLayout};

/// Width of the progress bar drawn by [`ConsolePresenter::status_line`]
const STATUS_BAR_WIDTH: usize = 30;

#[derive(Debug)]
pub struct ConsolePresenter {
    layout: WaveformLayout,
    line_height: f64,
    bars: Vec<bool>,
    time_display: String,
    icon: PlayIcon,
    lyrics: Vec<String>,
    active_line: Option<usize>,
    scroll_offset: f64,
    pending_frames: Vec<FrameTicket>,
}

impl ConsolePresenter {
    pub fn new(layout: WaveformLayout, line_height: f64) -> Self {
        Self {
            layout,
            line_height,
            bars: Vec::new(),
            time_display: String::new(),
            icon: PlayIcon::Play,
            lyrics: Vec::new(),
            active_line: None,
            scroll_offset: 0.0,
            pending_frames: Vec::new(),
        }
    }

    /// Frames requested since the last call
    pub fn take_frames(&mut self) -> Vec<FrameTicket> {
        std::mem::take(&mut self.pending_frames)
    }

    /// One-line summary: icon, time, a coarse waveform and the current line
    pub fn status_line(&self) -> String {
        let played = self.bars.iter().filter(|b| **b).count();
        let filled = if self.bars.is_empty() {
            0
        } else {
            played * STATUS_BAR_WIDTH / self.bars.len()
        };
        let bar: String = (0..STATUS_BAR_WIDTH)
            .map(|i| if i < filled { '#' } else { '.' })
            .collect();

        let icon = match self.icon {
            PlayIcon::Play => ">",
            PlayIcon::Pause => "||",
        };
        let line = self
            .active_line
            .and_then(|i| self.lyrics.get(i))
            .map_or("", String::as_str);

        format!("{icon} {} [{bar}] {line}", self.time_display)
            .trim_end()
            .to_string()
    }
}

impl Presenter for ConsolePresenter {
    fn render_waveform(&mut self, heights: &[f32]) {
        self.bars = vec![false; heights.len()];
        debug!("Waveform rendered with {} bars", heights.len());
    }

    fn set_bar_active(&mut self, index: usize, active: bool) {
        if let Some(bar) = self.bars.get_mut(index) {
            *bar = active;
        }
    }

    fn waveform_layout(&self) -> WaveformLayout {
        self.layout
    }

    fn set_time_display(&mut self, text: &str) {
        if self.time_display != text {
            debug!("{}", text);
            self.time_display = text.to_string();
        }
    }

    fn set_now_playing(&mut self, now_playing: &NowPlaying) {
        info!("Now playing: {} - {}", now_playing.artist, now_playing.title);
    }

    fn set_play_icon(&mut self, icon: PlayIcon) {
        self.icon = icon;
    }

    fn render_lyrics(&mut self, lines: &[LyricLine]) {
        self.lyrics = lines.iter().map(|line| line.text.clone()).collect();
        self.active_line = None;
        if lines.is_empty() {
            info!("No lyrics for this track");
        } else {
            info!("Lyrics loaded: {} lines", lines.len());
        }
    }

    fn set_lyric_active(&mut self, index: usize, active: bool) {
        if active {
            self.active_line = Some(index);
            if let Some(text) = self.lyrics.get(index) {
                info!("\u{266a} {}", text);
            }
        } else if self.active_line == Some(index) {
            self.active_line = None;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn lyric_line_offset(&self, index: usize) -> f64 {
        index as f64 * self.line_height
    }

    fn lyrics_scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_lyrics_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    fn request_animation_frame(&mut self, ticket: FrameTicket) {
        if !self.pending_frames.contains(&ticket) {
            self.pending_frames.push(ticket);
        }
    }

    fn set_track_duration_label(&mut self, index: usize, text: &str) {
        info!("Track #{} length {}", index, text);
    }

    fn set_track_visible(&mut self, index: usize, visible: bool) {
        debug!("Track #{} {}", index, if visible { "shown" } else { "hidden" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use waveplay_core::ScrollAnimator;

    fn presenter() -> ConsolePresenter {
        ConsolePresenter::new(WaveformLayout::default(), 32.0)
    }

    #[test]
    fn test_status_line_shows_progress() {
        let mut view = presenter();
        view.render_waveform(&[10.0; 90]);
        for index in 0..45 {
            view.set_bar_active(index, true);
        }
        view.set_time_display("0:45 / 1:30");
        view.set_play_icon(PlayIcon::Pause);

        let expected = format!("|| 0:45 / 1:30 [{}{}]", "#".repeat(15), ".".repeat(15));
        assert_eq!(view.status_line(), expected);
    }

    #[test]
    fn test_status_line_icon_matches_button() {
        let mut view = presenter();
        assert!(view.status_line().starts_with('>'));
        view.set_play_icon(PlayIcon::Pause);
        assert!(view.status_line().starts_with("||"));
        view.set_play_icon(PlayIcon::Play);
        assert!(view.status_line().starts_with('>'));
    }

    #[test]
    fn test_status_line_includes_active_lyric() {
        let mut view = presenter();
        view.render_lyrics(&[LyricLine::new(0.0, "first"), LyricLine::new(2.0, "second")]);
        view.set_lyric_active(1, true);
        assert!(view.status_line().ends_with("second"));

        view.set_lyric_active(1, false);
        assert!(view.status_line().ends_with(']'));
    }

    #[test]
    fn test_line_offsets_follow_line_height() {
        let view = presenter();
        assert!(view.lyric_line_offset(0).abs() < f64::EPSILON);
        assert!((view.lyric_line_offset(3) - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_take_frames_drains_and_dedupes() {
        let mut view = presenter();
        let mut animator = ScrollAnimator::new();
        let ticket = animator.start(0.0, 32.0, Duration::from_millis(400));

        view.request_animation_frame(ticket);
        view.request_animation_frame(ticket);
        assert_eq!(view.take_frames(), vec![ticket]);
        assert!(view.take_frames().is_empty());
    }

    #[test]
    fn test_out_of_range_bar_is_ignored() {
        let mut view = presenter();
        view.render_waveform(&[10.0; 4]);
        view.set_bar_active(10, true);
        assert!(view.bars.iter().all(|b| !b));
    }
}
