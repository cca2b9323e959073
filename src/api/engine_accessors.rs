use crate::api::chart_state::ChartState;
use crate::api::config::ChartEngineConfig;
use crate::api::edge_loader::LoadDirection;
use crate::api::engine::ChartEngine;
use crate::api::memo_cache::{CacheCategory, CacheStats, TickKey};
use crate::core::primitives::unix_seconds_to_millis;
use crate::core::{BarSeries, ViewTransform, ViewWindow, buffered_render_range, time_marks};
use crate::error::{ChartError, ChartResult};
use crate::render::DrawSurface;

impl<S: DrawSurface> ChartEngine<S> {
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn series(&self) -> &BarSeries {
        &self.series
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.interaction.transform()
    }

    #[must_use]
    pub fn last_state(&self) -> Option<&ChartState> {
        self.last_state.as_ref()
    }

    #[must_use]
    pub fn cache_stats(&self, category: CacheCategory) -> CacheStats {
        self.cache.stats(category)
    }

    #[must_use]
    pub fn edge_locked(&self, direction: LoadDirection) -> bool {
        self.locks.is_locked(direction)
    }

    #[must_use]
    pub fn pending_load_count(&self) -> usize {
        self.queue.len()
    }

    /// Wholesale cache reset; the documented staleness mitigation.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Interval marks anchored to the data's first bar, cache-checked.
    pub fn interval_marks(&mut self, interval_seconds: f64) -> ChartResult<Vec<f64>> {
        let key = TickKey {
            series: self.series.fingerprint(),
            interval_millis: unix_seconds_to_millis(interval_seconds),
        };
        if let Some(marks) = self.cache.get_tick_marks(&key) {
            return Ok(marks);
        }
        let marks = time_marks::interval_marks(self.series.bars(), interval_seconds)?;
        self.cache.put_tick_marks(key, marks.clone());
        Ok(marks)
    }

    /// Index range the surface should materialize marks for, buffered around
    /// the last rendered window.
    pub fn buffered_render_window(&self) -> ChartResult<ViewWindow> {
        let state = self.last_state.as_ref().ok_or_else(|| {
            ChartError::InvalidData("no chart state has been rendered yet".to_owned())
        })?;
        buffered_render_range(
            state.window,
            self.series.len(),
            self.config.window_size,
            self.config.render_buffer_bars,
        )
    }
}
