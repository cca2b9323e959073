use serde::{Deserialize, Serialize};

use crate::core::primitives::round_to_centi;
use crate::error::{ChartError, ChartResult};

/// Pan/zoom state relative to the identity (no pan, 1:1 zoom) mapping.
///
/// `translate_x`/`translate_y` are pixel offsets applied after scaling;
/// `scale` is the multiplicative zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform components rounded to two decimals and quantized to hundredths,
/// suitable for hashed cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantizedTransform {
    pub translate_x_centi: i64,
    pub translate_y_centi: i64,
    pub scale_centi: i64,
}

impl ViewTransform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.translate_x.is_finite() || !self.translate_y.is_finite() {
            return Err(ChartError::InvalidData(
                "transform translation must be finite".to_owned(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "transform scale must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self.translate_x == 0.0 && self.translate_y == 0.0 && self.scale == 1.0
    }

    /// Rounds each component to two decimals, collapsing per-frame gesture jitter.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            translate_x: round_to_centi(self.translate_x),
            translate_y: round_to_centi(self.translate_y),
            scale: round_to_centi(self.scale),
        }
    }

    #[must_use]
    pub fn quantized(self) -> QuantizedTransform {
        let rounded = self.rounded();
        QuantizedTransform {
            translate_x_centi: (rounded.translate_x * 100.0).round() as i64,
            translate_y_centi: (rounded.translate_y * 100.0).round() as i64,
            scale_centi: (rounded.scale * 100.0).round() as i64,
        }
    }

    /// Serialized form handed to the drawing surface for its group transform.
    #[must_use]
    pub fn transform_string(self) -> String {
        let rounded = self.rounded();
        format!(
            "translate({}, {}) scale({})",
            rounded.translate_x, rounded.translate_y, rounded.scale
        )
    }
}
