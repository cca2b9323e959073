use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Inclusive index interval over a bar series marking the bars intended to
/// be visible. Derived state: recomputed from pixel dimensions + transform,
/// or supplied directly by operations that already know their index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewWindow {
    start: usize,
    end: usize,
}

impl ViewWindow {
    pub fn new(start: usize, end: usize) -> ChartResult<Self> {
        if start > end {
            return Err(ChartError::InvalidData(
                "view window start must be <= end".to_owned(),
            ));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    #[must_use]
    pub fn start(self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(self) -> usize {
        self.end
    }

    /// Number of bars covered, inclusive of both ends.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Corrects a window against the series bounds before use.
    pub fn clamped_to_len(self, len: usize) -> ChartResult<Self> {
        if len == 0 {
            return Err(ChartError::EmptyDataset);
        }
        let last = len - 1;
        let end = self.end.min(last);
        let start = self.start.min(end);
        Ok(Self { start, end })
    }
}

/// Derives the visible window from the pan transform.
///
/// The newest bar anchors the right edge at identity; a horizontal pixel
/// translation converts to a whole-bar offset (`translate_x / band_width`,
/// rounded so a sub-half-bar drag never shifts the window). When clamping
/// collapses the view to the oldest bar, the window re-centers at the start
/// using the nominal window size rather than degenerating to a single point.
pub fn derive_window_from_transform(
    len: usize,
    window_size: usize,
    band_width: f64,
    translate_x: f64,
) -> ChartResult<ViewWindow> {
    if len == 0 {
        return Err(ChartError::EmptyDataset);
    }
    if window_size == 0 {
        return Err(ChartError::InvalidData(
            "window size must be >= 1".to_owned(),
        ));
    }
    if !band_width.is_finite() || band_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "band width must be finite and > 0".to_owned(),
        ));
    }
    if !translate_x.is_finite() {
        return Err(ChartError::InvalidData(
            "transform translation must be finite".to_owned(),
        ));
    }

    let last = (len - 1) as i64;
    let pan_offset_bars = (translate_x / band_width).round() as i64;
    let raw_end = last - pan_offset_bars;
    let end = raw_end.clamp(0, last);

    if end == 0 {
        // Collapse recovery: re-center at the start with the nominal window.
        let recovered_end = last.min(window_size as i64 - 1) as usize;
        return ViewWindow::new(0, recovered_end);
    }

    let start = (end - (window_size as i64 - 1)).max(0) as usize;
    ViewWindow::new(start, end as usize)
}

/// Window showing the most recent `window_size` bars (or all bars when fewer).
pub fn latest_window(len: usize, window_size: usize) -> ChartResult<ViewWindow> {
    if len == 0 {
        return Err(ChartError::EmptyDataset);
    }
    if window_size == 0 {
        return Err(ChartError::InvalidData(
            "window size must be >= 1".to_owned(),
        ));
    }
    let end = len - 1;
    let start = len.saturating_sub(window_size);
    ViewWindow::new(start, end)
}

/// Expands a window narrower than the nominal window size to that size,
/// centered on its midpoint and shifted back inside the series bounds.
pub fn expand_to_window_size(
    window: ViewWindow,
    len: usize,
    window_size: usize,
) -> ChartResult<ViewWindow> {
    let window = window.clamped_to_len(len)?;
    if window_size == 0 || window.len() >= window_size {
        return Ok(window);
    }
    if len <= window_size {
        return ViewWindow::new(0, len - 1);
    }

    let center = (window.start() + window.end()) / 2;
    let half = window_size / 2;
    let mut start = center.saturating_sub(half);
    let mut end = start + window_size - 1;
    if end > len - 1 {
        end = len - 1;
        start = end - (window_size - 1);
    }
    ViewWindow::new(start, end)
}

/// Computes the index range the drawing surface should materialize marks for.
///
/// Degenerate windows first expand to the nominal window size; buffering then
/// depends on which data bounds the window touches: both edges buffer the
/// full series, a touched start buffers forward only, a touched end buffers
/// backward only, and an interior window buffers both directions. All
/// results are clamped to the series bounds.
pub fn buffered_render_range(
    window: ViewWindow,
    len: usize,
    window_size: usize,
    buffer_bars: usize,
) -> ChartResult<ViewWindow> {
    let window = expand_to_window_size(window, len, window_size)?;
    let last = len - 1;
    let touches_start = window.start() == 0;
    let touches_end = window.end() == last;

    let (start, end) = match (touches_start, touches_end) {
        (true, true) => (0, last),
        (true, false) => (0, window.end().saturating_add(buffer_bars).min(last)),
        (false, true) => (window.start().saturating_sub(buffer_bars), last),
        (false, false) => (
            window.start().saturating_sub(buffer_bars),
            window.end().saturating_add(buffer_bars).min(last),
        ),
    };
    ViewWindow::new(start, end)
}
