use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel margins reserved around the plot area for axes and padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 16.0,
            right: 64.0,
            bottom: 28.0,
            left: 8.0,
        }
    }
}

impl Margins {
    /// Computes the inner plot dimensions for a viewport after margins.
    pub fn inner_size(self, viewport: Viewport) -> ChartResult<(f64, f64)> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        if !self.top.is_finite()
            || !self.right.is_finite()
            || !self.bottom.is_finite()
            || !self.left.is_finite()
            || self.top < 0.0
            || self.right < 0.0
            || self.bottom < 0.0
            || self.left < 0.0
        {
            return Err(ChartError::InvalidData(
                "margins must be finite and >= 0".to_owned(),
            ));
        }

        let inner_width = f64::from(viewport.width) - self.left - self.right;
        let inner_height = f64::from(viewport.height) - self.top - self.bottom;
        if inner_width <= 0.0 || inner_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "margins leave no drawable inner area".to_owned(),
            ));
        }

        Ok((inner_width, inner_height))
    }
}
