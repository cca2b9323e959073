use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, OhlcBar, ViewWindow};
use crate::error::{ChartError, ChartResult};

/// The calculator's output: everything a drawing surface needs to place
/// marks for one render pass.
///
/// Ephemeral by design; recomputed (or cache-hit) on every render call and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    pub inner_width: f64,
    pub inner_height: f64,
    /// Index-space map with the newest bar anchored at the right edge.
    pub base_x: LinearScale,
    /// Price-space map with inverted pixel range (higher price, smaller y).
    pub base_y: LinearScale,
    pub transformed_x: LinearScale,
    pub transformed_y: LinearScale,
    pub window: ViewWindow,
    pub visible: Vec<OhlcBar>,
    pub transform_string: String,
}

impl ChartState {
    /// Resolved Y domain, post policy resolution and padding.
    #[must_use]
    pub fn price_domain(&self) -> (f64, f64) {
        self.base_y.domain()
    }

    /// Pixel width of one bar band at 1:1 zoom.
    ///
    /// The index domain spans `len - 1` while the pixel range spans `len`
    /// whole bands, hence the `+ 1`.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.base_x.range();
        let (d0, d1) = self.base_x.domain();
        (r1 - r0) / (d1 - d0 + 1.0)
    }

    /// Geometry sanity check used by surfaces before drawing.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.inner_width.is_finite()
            || !self.inner_height.is_finite()
            || self.inner_width <= 0.0
            || self.inner_height <= 0.0
        {
            return Err(ChartError::InvalidData(
                "chart state inner dimensions must be finite and > 0".to_owned(),
            ));
        }

        for scale in [
            self.base_x,
            self.base_y,
            self.transformed_x,
            self.transformed_y,
        ] {
            let (d0, d1) = scale.domain();
            let (r0, r1) = scale.range();
            if !d0.is_finite() || !d1.is_finite() || !r0.is_finite() || !r1.is_finite() {
                return Err(ChartError::InvalidData(
                    "chart state scales must be finite".to_owned(),
                ));
            }
        }

        if self.visible.len() != self.window.len() {
            return Err(ChartError::InvalidData(
                "visible slice length must match the view window".to_owned(),
            ));
        }

        Ok(())
    }
}
