mod null_surface;

pub use null_surface::NullSurface;

use serde::{Deserialize, Serialize};

use crate::api::ChartState;
use crate::error::ChartResult;

/// Crop region covering the full extent of the loaded dataset, updated
/// before each draw so marks outside the plot area stay clipped as the
/// series grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Contract implemented by any drawing backend.
///
/// Surfaces receive a fully materialized, deterministic [`ChartState`] so
/// drawing code remains isolated from viewport math and dispatch logic.
pub trait DrawSurface {
    fn set_clip_region(&mut self, region: ClipRegion) -> ChartResult<()>;
    fn draw(&mut self, state: &ChartState) -> ChartResult<()>;
}
