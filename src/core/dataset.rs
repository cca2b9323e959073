use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::core::OhlcBar;
use crate::core::primitives::unix_seconds_to_millis;
use crate::core::view_window::ViewWindow;
use crate::error::{ChartError, ChartResult};

/// Coarse identity of a bar series used as a cache-key component.
///
/// Two series with identical length and identical first/last timestamps are
/// treated as the same series for caching purposes; content hashing every bar
/// would defeat the O(1) key-construction goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesFingerprint {
    pub len: usize,
    pub first_time_millis: i64,
    pub last_time_millis: i64,
}

/// Outcome of applying a streamed bar to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamApplied {
    Appended,
    ReplacedLatest,
}

/// Ordered, index-addressable OHLCV container.
///
/// Index 0 is the oldest bar, `len - 1` the newest. The series grows by
/// prepending older history or appending newer bars; bars are never mutated
/// in place.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<OhlcBar>,
}

impl BarSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from pre-ordered bars, validating timestamp order.
    pub fn from_bars(bars: Vec<OhlcBar>) -> ChartResult<Self> {
        validate_monotonic(&bars)?;
        Ok(Self { bars })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<OhlcBar> {
        self.bars.get(index).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<OhlcBar> {
        self.bars.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<OhlcBar> {
        self.bars.last().copied()
    }

    /// Replaces the series wholesale, e.g. on symbol or timeframe switch.
    pub fn replace(&mut self, bars: Vec<OhlcBar>) -> ChartResult<()> {
        validate_monotonic(&bars)?;
        debug!(count = bars.len(), "replace bar series");
        self.bars = bars;
        Ok(())
    }

    /// Appends a bar strictly at or after the newest timestamp.
    pub fn append_bar(&mut self, bar: OhlcBar) -> ChartResult<()> {
        if let Some(last) = self.bars.last()
            && bar.time < last.time
        {
            return Err(ChartError::InvalidData(
                "appended bar time must be >= newest bar time".to_owned(),
            ));
        }
        self.bars.push(bar);
        trace!(count = self.bars.len(), "append bar");
        Ok(())
    }

    /// Prepends an older-history page loaded on demand.
    ///
    /// The page must itself be ordered and end at or before the current
    /// oldest bar.
    pub fn prepend_history(&mut self, mut page: Vec<OhlcBar>) -> ChartResult<()> {
        validate_monotonic(&page)?;
        if let (Some(page_last), Some(first)) = (page.last(), self.bars.first())
            && page_last.time > first.time
        {
            return Err(ChartError::InvalidData(
                "prepended history must end at or before the oldest bar".to_owned(),
            ));
        }
        debug!(count = page.len(), "prepend history page");
        page.extend(self.bars.drain(..));
        self.bars = page;
        Ok(())
    }

    /// Applies a streamed bar using realtime-update semantics:
    /// - appends when `bar.time` is newer than the newest sample
    /// - replaces the newest sample when `bar.time` is equal
    /// - rejects out-of-order updates (`bar.time` older than the newest sample)
    pub fn apply_stream_bar(&mut self, bar: OhlcBar) -> ChartResult<StreamApplied> {
        match self
            .bars
            .last()
            .map_or(Ordering::Greater, |last| bar.time.total_cmp(&last.time))
        {
            Ordering::Less => Err(ChartError::InvalidData(
                "stream bar time must be >= newest bar time".to_owned(),
            )),
            Ordering::Equal => {
                if let Some(last) = self.bars.last_mut() {
                    *last = bar;
                    trace!("stream bar replaced newest sample");
                    Ok(StreamApplied::ReplacedLatest)
                } else {
                    self.bars.push(bar);
                    Ok(StreamApplied::Appended)
                }
            }
            Ordering::Greater => {
                self.bars.push(bar);
                trace!(count = self.bars.len(), "stream bar appended");
                Ok(StreamApplied::Appended)
            }
        }
    }

    /// Coarse cache-key identity; empty series collapse to a zeroed fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> SeriesFingerprint {
        SeriesFingerprint {
            len: self.bars.len(),
            first_time_millis: self
                .bars
                .first()
                .map_or(0, |bar| unix_seconds_to_millis(bar.time)),
            last_time_millis: self
                .bars
                .last()
                .map_or(0, |bar| unix_seconds_to_millis(bar.time)),
        }
    }

    /// Inclusive slice for a window already clamped to the series bounds.
    #[must_use]
    pub fn slice(&self, window: ViewWindow) -> &[OhlcBar] {
        if self.bars.is_empty() {
            return &[];
        }
        let end = window.end().min(self.bars.len() - 1);
        let start = window.start().min(end);
        &self.bars[start..=end]
    }
}

fn validate_monotonic(bars: &[OhlcBar]) -> ChartResult<()> {
    for pair in bars.windows(2) {
        if pair[1].time < pair[0].time {
            return Err(ChartError::InvalidData(
                "bar timestamps must be non-decreasing".to_owned(),
            ));
        }
    }
    Ok(())
}
