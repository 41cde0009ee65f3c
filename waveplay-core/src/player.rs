//! The player context.
//!
//! [`Player`] owns every piece of mutable widget state: the selected track,
//! the waveform, the lyrics synchronizer, the scroll animation and the seek
//! gesture. Hosts route all media notifications and user input through its
//! `&mut self` handlers, one event at a time, so no state is shared.

use crate::config::WaveplayConfig;
use crate::lyrics::LyricsSync;
use crate::navigator::TrackNavigator;
use crate::playback::{MediaElement, PlaybackState};
use crate::playlist::Playlist;
use crate::presenter::{NowPlaying, PlayIcon, Presenter};
use crate::scroll::{FrameStep, FrameTicket, ScrollAnimator, DEFAULT_SCROLL_DURATION};
use crate::seek::{seek_fraction, SeekGesture};
use crate::time::{format_progress, format_time, sanitize_seconds};
use crate::waveform::{HeightRange, Waveform, DEFAULT_BAR_COUNT};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const LOG_TARGET: &str = "waveplay::player";

/// Tunables the player needs from the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerOptions {
    pub bar_count: usize,
    pub bar_heights: HeightRange,
    pub scroll_duration: Duration,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            bar_count: DEFAULT_BAR_COUNT,
            bar_heights: HeightRange::default(),
            scroll_duration: DEFAULT_SCROLL_DURATION,
        }
    }
}

impl From<&WaveplayConfig> for PlayerOptions {
    fn from(config: &WaveplayConfig) -> Self {
        Self {
            bar_count: config.waveform.bar_count,
            bar_heights: config.waveform.height_range(),
            scroll_duration: config.lyrics.scroll_duration(),
        }
    }
}

pub struct Player<M, P> {
    options: PlayerOptions,
    playlist: Playlist,
    media: M,
    presenter: P,
    navigator: TrackNavigator,
    waveform: Waveform,
    lyrics: LyricsSync,
    scroll: ScrollAnimator,
    gesture: SeekGesture,
}

impl<M: MediaElement, P: Presenter> Player<M, P> {
    /// Create a player. The waveform heights are generated here, once.
    ///
    /// Nothing is drawn until [`start`](Self::start) is called.
    #[must_use]
    pub fn new(options: PlayerOptions, playlist: Playlist, media: M, presenter: P) -> Self {
        let waveform = Waveform::generate(options.bar_count, options.bar_heights);
        let navigator = TrackNavigator::new(playlist.len());

        Self {
            options,
            playlist,
            media,
            presenter,
            navigator,
            waveform,
            lyrics: LyricsSync::new(),
            scroll: ScrollAnimator::new(),
            gesture: SeekGesture::default(),
        }
    }

    /// First paint: waveform, time display, and the first track's details
    /// and lyrics. Playback is not started.
    pub fn start(&mut self) {
        self.presenter.render_waveform(self.waveform.heights());

        let icon = if self.media.is_paused() {
            PlayIcon::Play
        } else {
            PlayIcon::Pause
        };
        self.presenter.set_play_icon(icon);

        self.show_track(self.navigator.current());
        self.refresh_progress(sanitize_seconds(self.media.current_time()));

        info!(
            target: LOG_TARGET,
            "Player ready: {} bars, {} track(s)",
            self.waveform.bar_count(),
            self.playlist.len()
        );
    }

    /// Snapshot of the current playback state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState::from_media(self.navigator.current(), &self.media)
    }

    #[must_use]
    pub const fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    #[must_use]
    pub const fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Index of the highlighted lyric line, if any
    #[must_use]
    pub const fn active_line(&self) -> Option<usize> {
        self.lyrics.active()
    }

    #[must_use]
    pub const fn media(&self) -> &M {
        &self.media
    }

    /// Hosts drive their media clock through this
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // ----- media notifications -----

    /// The media position advanced
    pub fn on_time_advance(&mut self) {
        let current = sanitize_seconds(self.media.current_time());
        self.refresh_progress(current);
        self.sync_lyrics(current);
    }

    /// The current source's duration became known
    pub fn on_metadata_ready(&mut self) {
        debug!(
            target: LOG_TARGET,
            "Metadata ready, duration {}",
            format_time(self.media.duration())
        );
        self.refresh_progress(sanitize_seconds(self.media.current_time()));
    }

    /// Playback reached the end of the source
    pub fn on_ended(&mut self) {
        self.presenter.set_play_icon(PlayIcon::Play);
        self.on_time_advance();
    }

    /// A playlist row's duration became known
    pub fn on_track_metadata(&mut self, index: usize, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            warn!(
                target: LOG_TARGET,
                "Track #{} reported an unusable duration: {}", index, duration
            );
            return;
        }
        if !self.playlist.set_duration(index, duration) {
            debug!(target: LOG_TARGET, "Ignoring metadata for unknown track #{}", index);
            return;
        }
        self.presenter
            .set_track_duration_label(index, &format_time(duration));
    }

    // ----- transport -----

    pub fn toggle_play(&mut self) {
        if self.media.is_paused() {
            self.media.play();
            self.presenter.set_play_icon(PlayIcon::Pause);
        } else {
            self.media.pause();
            self.presenter.set_play_icon(PlayIcon::Play);
        }
    }

    /// Play the track at `index` from the start. Out-of-range indices are
    /// ignored. Selecting the current track restarts it.
    pub fn select(&mut self, index: usize) {
        let Some(index) = self.navigator.select(index) else {
            debug!(
                target: LOG_TARGET,
                "Ignoring selection of track #{} (playlist has {})",
                index,
                self.playlist.len()
            );
            return;
        };
        let Some(track) = self.playlist.get(index) else {
            return;
        };

        info!(
            target: LOG_TARGET,
            "Playing track #{}: {} - {}",
            index,
            track.display_artist(),
            track.display_title()
        );

        self.media.set_source(&track.source);
        self.media.play();
        self.presenter.set_play_icon(PlayIcon::Pause);

        self.show_track(index);
        // No tick has fired for the fresh source yet
        self.on_time_advance();
    }

    pub fn next(&mut self) {
        self.select(self.navigator.next_index());
    }

    pub fn previous(&mut self) {
        self.select(self.navigator.previous_index());
    }

    // ----- waveform pointer input -----

    pub fn click(&mut self, client_x: f64) {
        self.seek_to_pointer(client_x);
    }

    pub fn pointer_down(&mut self, client_x: f64) {
        self.gesture.press();
        self.seek_to_pointer(client_x);
    }

    /// Window-level pointer move; seeks only while a drag is in progress
    pub fn pointer_move(&mut self, client_x: f64) {
        if self.gesture.is_dragging() {
            self.seek_to_pointer(client_x);
        }
    }

    /// Window-level pointer release; always ends the drag
    pub fn pointer_up(&mut self) {
        self.gesture.release();
    }

    // ----- animation -----

    /// A frame requested through [`Presenter::request_animation_frame`] is due
    pub fn on_animation_frame(&mut self, ticket: FrameTicket, now: Instant) {
        match self.scroll.frame(ticket, now) {
            FrameStep::Continue(offset) => {
                self.presenter.set_lyrics_scroll_offset(offset);
                self.presenter.request_animation_frame(ticket);
            }
            FrameStep::Finished(offset) => {
                self.presenter.set_lyrics_scroll_offset(offset);
            }
            FrameStep::Stale => {}
        }
    }

    // ----- playlist filter -----

    /// Show only rows whose title or artist contains `term`, ignoring case.
    /// Returns the number of visible rows.
    pub fn search(&mut self, term: &str) -> usize {
        let mut visible = 0;
        for (index, track) in self.playlist.tracks().iter().enumerate() {
            let matches = track.matches(term);
            self.presenter.set_track_visible(index, matches);
            visible += usize::from(matches);
        }
        debug!(target: LOG_TARGET, "Search {:?} matched {} track(s)", term, visible);
        visible
    }

    // ----- internals -----

    /// Header details and a fresh lyrics panel for `index`
    fn show_track(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            return;
        };

        self.presenter.set_now_playing(&NowPlaying {
            thumbnail: track.thumbnail.clone(),
            title: track.display_title().to_string(),
            artist: track.display_artist().to_string(),
        });

        self.scroll.cancel();
        self.lyrics.load(track.lyrics.clone());
        self.presenter.render_lyrics(self.lyrics.lines());
        self.presenter.set_lyrics_scroll_offset(0.0);
    }

    fn refresh_progress(&mut self, current: f64) {
        let duration = sanitize_seconds(self.media.duration());

        if let Some(change) = self.waveform.update_progress(current, duration) {
            for index in change.bars {
                self.presenter.set_bar_active(index, change.active);
            }
        }
        self.presenter
            .set_time_display(&format_progress(current, duration));
    }

    fn sync_lyrics(&mut self, current: f64) {
        let Some(change) = self.lyrics.on_tick(current) else {
            return;
        };

        if let Some(previous) = change.previous {
            self.presenter.set_lyric_active(previous, false);
        }
        let Some(active) = change.current else {
            return;
        };
        self.presenter.set_lyric_active(active, true);

        let from = self.presenter.lyrics_scroll_offset();
        let to = self.presenter.lyric_line_offset(active);
        let ticket = self.scroll.start(from, to, self.options.scroll_duration);
        self.presenter.request_animation_frame(ticket);
    }

    fn seek_to_pointer(&mut self, client_x: f64) {
        let layout = self.presenter.waveform_layout();
        let fraction = seek_fraction(client_x, &layout, self.waveform.bar_count());
        let target = fraction * sanitize_seconds(self.media.duration());

        debug!(
            target: LOG_TARGET,
            "Seek to {} ({:.1}%)",
            format_time(target),
            fraction * 100.0
        );

        self.media.set_current_time(target);
        // Refresh now rather than waiting for the next tick
        self.refresh_progress(target);
    }
}
