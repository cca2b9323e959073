use crate::api::ChartState;
use crate::error::ChartResult;
use crate::render::{ClipRegion, DrawSurface};

/// No-op surface used by tests and headless engine usage.
///
/// It still validates chart state so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub last_clip: Option<ClipRegion>,
    pub draw_count: usize,
    pub last_visible_count: usize,
}

impl DrawSurface for NullSurface {
    fn set_clip_region(&mut self, region: ClipRegion) -> ChartResult<()> {
        self.last_clip = Some(region);
        Ok(())
    }

    fn draw(&mut self, state: &ChartState) -> ChartResult<()> {
        state.validate()?;
        self.draw_count += 1;
        self.last_visible_count = state.visible.len();
        Ok(())
    }
}
