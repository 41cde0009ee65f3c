use crate::time::sanitize_seconds;

/// The host's media playback primitive.
///
/// Times are in seconds. `duration` returns `NaN` until the metadata of the
/// current source has loaded. Notifications travel the other way: the host
/// calls [`Player::on_time_advance`](crate::Player::on_time_advance),
/// [`Player::on_metadata_ready`](crate::Player::on_metadata_ready) and
/// [`Player::on_ended`](crate::Player::on_ended).
pub trait MediaElement {
    /// Load a new source. Position resets to zero and the duration becomes
    /// unknown until metadata is ready.
    fn set_source(&mut self, locator: &str);

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    fn duration(&self) -> f64;
}

/// Snapshot of the player's playback state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Index of the selected track in the playlist
    pub current_track_index: usize,
    /// Current playback position in seconds
    pub current_time: f64,
    /// Track duration in seconds, `0.0` while unknown
    pub duration: f64,
    /// Whether the media is playing
    pub is_playing: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track_index: 0,
            current_time: 0.0,
            duration: 0.0,
            is_playing: false,
        }
    }
}

impl PlaybackState {
    /// Read a snapshot from a media element
    #[must_use]
    pub fn from_media(current_track_index: usize, media: &impl MediaElement) -> Self {
        Self {
            current_track_index,
            current_time: sanitize_seconds(media.current_time()),
            duration: sanitize_seconds(media.duration()),
            is_playing: !media.is_paused(),
        }
    }

    /// Played fraction of the track in `[0, 1]`, with an unknown or zero
    /// duration counted as one second
    #[must_use]
    pub fn progress(&self) -> f64 {
        (sanitize_seconds(self.current_time) / sanitize_seconds(self.duration).max(1.0)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubMedia {
        time: f64,
        duration: f64,
        paused: bool,
    }

    impl MediaElement for StubMedia {
        fn set_source(&mut self, _locator: &str) {}
        fn play(&mut self) {
            self.paused = false;
        }
        fn pause(&mut self) {
            self.paused = true;
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
        fn current_time(&self) -> f64 {
            self.time
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.time = seconds;
        }
        fn duration(&self) -> f64 {
            self.duration
        }
    }

    #[test]
    fn test_playback_state_default() {
        let state = PlaybackState::default();
        assert_eq!(state.current_track_index, 0);
        assert!(!state.is_playing);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_media_sanitizes_unknown_duration() {
        let media = StubMedia {
            time: 0.0,
            duration: f64::NAN,
            paused: false,
        };

        let state = PlaybackState::from_media(2, &media);
        assert_eq!(state.current_track_index, 2);
        assert!(state.is_playing);
        assert!(state.duration.abs() < f64::EPSILON);
        assert!(state.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress() {
        let state = PlaybackState {
            current_time: 45.0,
            duration: 180.0,
            ..Default::default()
        };
        assert!((state.progress() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_clamped() {
        let state = PlaybackState {
            current_time: 200.0,
            duration: 180.0,
            ..Default::default()
        };
        assert!((state.progress() - 1.0).abs() < f64::EPSILON);
    }
}
