use serde::{Deserialize, Serialize};

use crate::core::ViewTransform;
use crate::error::{ChartError, ChartResult};

/// Minimum domain span used to widen degenerate (single-value) domains.
const MIN_DOMAIN_SPAN: f64 = 1.0;

/// Linear map from a data domain to a pixel range.
///
/// Unlike an axis scale tied to a viewport, both endpoints of the range are
/// explicit: the right-aligned X scale maps index space onto a range whose
/// left edge sits off-screen for datasets wider than the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Creates a scale, widening a degenerate domain by a minimum span so a
    /// single-bar dataset still produces usable geometry.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        let (domain_start, domain_end) = if domain.0 == domain.1 {
            let half = MIN_DOMAIN_SPAN / 2.0;
            (domain.0 - half, domain.1 + half)
        } else {
            (domain.0, domain.1)
        };

        Ok(Self {
            domain_start,
            domain_end,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to its pixel position.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel position back to its domain value.
    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a collapsed range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Composes a pan/zoom onto the base map: every output pixel becomes
    /// `pixel * scale + translate`.
    #[must_use]
    pub fn rescaled(self, scale: f64, translate: f64) -> Self {
        Self {
            domain_start: self.domain_start,
            domain_end: self.domain_end,
            range_start: self.range_start * scale + translate,
            range_end: self.range_end * scale + translate,
        }
    }

    /// Applies the horizontal components of a view transform.
    #[must_use]
    pub fn rescaled_x(self, transform: ViewTransform) -> Self {
        self.rescaled(transform.scale, transform.translate_x)
    }

    /// Applies the vertical components of a view transform.
    #[must_use]
    pub fn rescaled_y(self, transform: ViewTransform) -> Self {
        self.rescaled(transform.scale, transform.translate_y)
    }
}
