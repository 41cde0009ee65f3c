/// Current position in a fixed, non-empty playlist.
///
/// The index is always in `[0, track_count)`: out-of-range selections are
/// rejected and next/previous wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackNavigator {
    current: usize,
    track_count: usize,
}

impl TrackNavigator {
    /// Navigator over `track_count` tracks, starting at the first one.
    ///
    /// `track_count` is clamped to at least one.
    #[must_use]
    pub fn new(track_count: usize) -> Self {
        Self {
            current: 0,
            track_count: track_count.max(1),
        }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn track_count(&self) -> usize {
        self.track_count
    }

    /// Move to `index`. Returns `None` and leaves the state untouched when
    /// `index` is out of range.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.track_count {
            return None;
        }
        self.current = index;
        Some(index)
    }

    /// Index after the current one, wrapping to the first track
    #[must_use]
    pub const fn next_index(&self) -> usize {
        (self.current + 1) % self.track_count
    }

    /// Index before the current one, wrapping to the last track
    #[must_use]
    pub const fn previous_index(&self) -> usize {
        (self.current + self.track_count - 1) % self.track_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_in_range() {
        let mut nav = TrackNavigator::new(3);
        assert_eq!(nav.select(2), Some(2));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut nav = TrackNavigator::new(3);
        nav.select(1);
        assert_eq!(nav.select(3), None);
        assert_eq!(nav.select(usize::MAX), None);
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_next_wraps() {
        let mut nav = TrackNavigator::new(3);
        nav.select(2);
        assert_eq!(nav.next_index(), 0);
    }

    #[test]
    fn test_previous_wraps() {
        let mut nav = TrackNavigator::new(3);
        nav.select(0);
        assert_eq!(nav.previous_index(), 2);
    }

    #[test]
    fn test_single_track_wraps_to_itself() {
        let nav = TrackNavigator::new(1);
        assert_eq!(nav.next_index(), 0);
        assert_eq!(nav.previous_index(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut nav = TrackNavigator::new(5);
        nav.select(3);
        for _ in 0..nav.track_count() {
            let next = nav.next_index();
            nav.select(next);
        }
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn test_empty_count_clamped() {
        let nav = TrackNavigator::new(0);
        assert_eq!(nav.track_count(), 1);
        assert_eq!(nav.current(), 0);
    }
}
