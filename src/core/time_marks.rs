use crate::core::OhlcBar;
use crate::error::{ChartError, ChartResult};

/// Generates interval marks anchored to the data's own first bar.
///
/// Starting from the first bar, a mark is emitted at the first bar whose
/// timestamp is at or past `previous mark + interval_seconds`. Anchoring to
/// the data rather than calendar boundaries keeps marks stable across
/// sessions with gaps (weekends, halts). The newest bar never receives an
/// interval mark; the axis labels it separately as the live edge.
pub fn interval_marks(bars: &[OhlcBar], interval_seconds: f64) -> ChartResult<Vec<f64>> {
    if !interval_seconds.is_finite() || interval_seconds <= 0.0 {
        return Err(ChartError::InvalidData(
            "mark interval must be finite and > 0".to_owned(),
        ));
    }

    let Some(first) = bars.first() else {
        return Ok(Vec::new());
    };

    let mut marks = vec![first.time];
    let mut next_threshold = first.time + interval_seconds;

    // Interior bars only: the newest bar keeps its dedicated live label.
    let interior = bars.get(1..bars.len() - 1).unwrap_or(&[]);
    for bar in interior {
        if bar.time >= next_threshold {
            marks.push(bar.time);
            next_threshold = bar.time + interval_seconds;
        }
    }

    Ok(marks)
}

/// Index positions of [`interval_marks`] within the series, for callers that
/// address marks in index space rather than time space.
pub fn interval_mark_indices(bars: &[OhlcBar], interval_seconds: f64) -> ChartResult<Vec<usize>> {
    if !interval_seconds.is_finite() || interval_seconds <= 0.0 {
        return Err(ChartError::InvalidData(
            "mark interval must be finite and > 0".to_owned(),
        ));
    }

    let Some(first) = bars.first() else {
        return Ok(Vec::new());
    };

    let mut indices = vec![0];
    let mut next_threshold = first.time + interval_seconds;

    let interior = bars.get(1..bars.len() - 1).unwrap_or(&[]);
    for (offset, bar) in interior.iter().enumerate() {
        if bar.time >= next_threshold {
            indices.push(offset + 1);
            next_threshold = bar.time + interval_seconds;
        }
    }

    Ok(indices)
}
