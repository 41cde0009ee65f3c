//! Pointer position to playback progress.

/// Rendered geometry of the waveform container, in the same coordinate
/// space as pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveformLayout {
    /// Left edge of the container's bounding box
    pub left: f64,
    /// Width of the container's bounding box
    pub width: f64,
    /// Rendered width of a single bar
    pub bar_width: f64,
    /// Gap between two adjacent bars
    pub gap: f64,
}

impl WaveformLayout {
    /// Width covered by `bar_count` bars and the gaps between them
    #[must_use]
    pub fn bars_width(&self, bar_count: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let bars = bar_count as f64;
        #[allow(clippy::cast_precision_loss)]
        let gaps = bar_count.saturating_sub(1) as f64;
        self.bar_width.mul_add(bars, self.gap * gaps)
    }

    /// Blank space left of the first bar; bars are centered in the container
    #[must_use]
    pub fn left_padding(&self, bar_count: usize) -> f64 {
        (self.width - self.bars_width(bar_count)) / 2.0
    }
}

/// Map a pointer's horizontal coordinate to a progress fraction in `[0, 1]`.
///
/// Pointers left of the first bar read `0`, right of the last bar read `1`.
/// A waveform that has not been laid out yet (zero or negative bar width)
/// always reads `0`.
#[must_use]
pub fn seek_fraction(client_x: f64, layout: &WaveformLayout, bar_count: usize) -> f64 {
    let total_width = layout.bars_width(bar_count);
    if !(total_width.is_finite() && total_width > 0.0) {
        return 0.0;
    }

    let adjusted_x = client_x - layout.left - layout.left_padding(bar_count);
    let fraction = adjusted_x / total_width;
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

/// Press-drag-release state of a seek gesture.
///
/// Moves only seek while the pointer is held. Releases are accepted from
/// anywhere, so a drag that leaves the waveform still ends cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeekGesture {
    dragging: bool,
}

impl SeekGesture {
    pub fn press(&mut self) {
        self.dragging = true;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }
}
