use serde::Deserialize;

/// A single line of synced lyrics
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LyricLine {
    /// When the line starts, in seconds from the start of the track
    pub time: f64,
    pub text: String,
}

impl LyricLine {
    #[must_use]
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Index of the line being sung at `position`: the greatest index whose
/// timestamp is at or before `position`, or `None` before the first line.
///
/// Lines are expected in ascending timestamp order. Out-of-order input is
/// not repaired; the greatest qualifying index still wins.
#[must_use]
pub fn active_line_index(lines: &[LyricLine], position: f64) -> Option<usize> {
    lines.iter().rposition(|line| line.time <= position)
}

/// Active line transition produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    /// Line that was active before the tick
    pub previous: Option<usize>,
    /// Line that is active now; the only line to highlight
    pub current: Option<usize>,
}

/// Tracks the active lyric line of the current track and reports only
/// actual transitions, so repeated ticks inside one line cost nothing.
#[derive(Debug, Clone, Default)]
pub struct LyricsSync {
    lines: Vec<LyricLine>,
    last_active: Option<usize>,
}

impl LyricsSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the line set for a new track and forget the active line.
    pub fn load(&mut self, lines: Vec<LyricLine>) {
        self.lines = lines;
        self.last_active = None;
    }

    #[must_use]
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.last_active
    }

    /// Recompute the active line for `position`.
    ///
    /// Returns `None` when the active line is unchanged.
    pub fn on_tick(&mut self, position: f64) -> Option<LineChange> {
        let current = active_line_index(&self.lines, position);
        if current == self.last_active {
            return None;
        }

        let previous = std::mem::replace(&mut self.last_active, current);
        Some(LineChange { previous, current })
    }
}
