use tracing::debug;

use crate::api::chart_state::ChartState;
use crate::api::config::ChartEngineConfig;
use crate::api::dispatcher::RenderOutcome;
use crate::api::edge_loader::{DataLoader, EdgeLockState, LoadDirection, reconcile_load_result};
use crate::api::memo_cache::ComputeCache;
use crate::api::render_mode::RenderMode;
use crate::api::task_queue::DeferredTaskQueue;
use crate::core::{
    BarSeries, OhlcBar, StreamApplied, ViewTransform, ViewWindow,
    derive_window_from_transform, latest_window,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{GestureEvent, InteractionState};
use crate::render::DrawSurface;

/// The chart engine: owns the dataset, the computation cache, gesture and
/// edge-lock state, and an optional drawing surface.
///
/// All computation runs synchronously inside the host's event turn; the only
/// asynchronous boundary is the deferred load queue drained by the host via
/// [`ChartEngine::drain_pending_loads`].
pub struct ChartEngine<S: DrawSurface> {
    pub(super) config: ChartEngineConfig,
    pub(super) surface: Option<S>,
    pub(super) series: BarSeries,
    pub(super) cache: ComputeCache,
    pub(super) interaction: InteractionState,
    pub(super) locks: EdgeLockState,
    pub(super) queue: DeferredTaskQueue,
    pub(super) last_state: Option<ChartState>,
    pub(super) last_resolved_domain: Option<(f64, f64)>,
}

impl<S: DrawSurface> ChartEngine<S> {
    pub fn new(surface: S, config: ChartEngineConfig) -> ChartResult<Self> {
        let mut engine = Self::detached(config)?;
        engine.surface = Some(surface);
        Ok(engine)
    }

    /// Builds an engine with no surface attached. Render operations report a
    /// structured failure until [`ChartEngine::attach_surface`] is called.
    pub fn detached(config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            config,
            surface: None,
            series: BarSeries::new(),
            cache: ComputeCache::new(config.cache_ceilings),
            interaction: InteractionState::default(),
            locks: EdgeLockState::default(),
            queue: DeferredTaskQueue::default(),
            last_state: None,
            last_resolved_domain: None,
        })
    }

    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Replaces the dataset wholesale (symbol/timeframe switch). Clears the
    /// computation cache and releases both edge locks: every cached premise
    /// is gone with the old series.
    pub fn set_bars(&mut self, bars: Vec<OhlcBar>) -> ChartResult<()> {
        self.series.replace(bars)?;
        self.cache.clear();
        self.locks.release(LoadDirection::Past);
        self.locks.release(LoadDirection::Future);
        self.last_state = None;
        self.last_resolved_domain = None;
        debug!(count = self.series.len(), "dataset replaced");
        Ok(())
    }

    /// Prepends an older-history page (the `Past` load path).
    pub fn prepend_bars(&mut self, page: Vec<OhlcBar>) -> ChartResult<()> {
        self.series.prepend_history(page)
    }

    /// Appends a strictly newer bar (the `Future` load path).
    pub fn append_bar(&mut self, bar: OhlcBar) -> ChartResult<()> {
        self.series.append_bar(bar)
    }

    /// Applies a streamed bar with realtime-update semantics.
    pub fn apply_stream_bar(&mut self, bar: OhlcBar) -> ChartResult<StreamApplied> {
        self.series.apply_stream_bar(bar)
    }

    pub fn render_initial(&mut self) -> RenderOutcome {
        self.render(RenderMode::Initial)
    }

    pub fn render_pan(&mut self, window: ViewWindow) -> RenderOutcome {
        self.render(RenderMode::Panning(window))
    }

    pub fn render_skip_to(&mut self, window: ViewWindow) -> RenderOutcome {
        self.render(RenderMode::SkipTo(window))
    }

    /// Jumps to the most recent `window_size` bars.
    pub fn skip_to_latest(&mut self) -> RenderOutcome {
        match latest_window(self.series.len(), self.config.window_size) {
            Ok(window) => self.render(RenderMode::SkipTo(window)),
            Err(err) => RenderOutcome::failure(err.to_string()),
        }
    }

    pub fn render_streaming(&mut self) -> RenderOutcome {
        self.render(RenderMode::Streaming)
    }

    /// Shifts the current window by a horizontal pixel delta and renders a
    /// pan. Positive deltas (dragging right) reveal older bars.
    pub fn pan_by_pixels(&mut self, delta_px: f64) -> RenderOutcome {
        if !delta_px.is_finite() {
            return RenderOutcome::failure("pan delta must be finite");
        }
        let len = self.series.len();
        if len == 0 {
            return RenderOutcome::failure(ChartError::EmptyDataset.to_string());
        }

        let current = match self.current_window() {
            Ok(window) => window,
            Err(err) => return RenderOutcome::failure(err.to_string()),
        };
        let band_width = match self.band_width() {
            Ok(band_width) => band_width,
            Err(err) => return RenderOutcome::failure(err.to_string()),
        };

        let shift = (delta_px / band_width).round() as i64;
        let size = current.len() as i64;
        let last = (len - 1) as i64;
        let end = (current.end() as i64 - shift).clamp((size - 1).min(last), last);
        let start = (end - (size - 1)).max(0);
        match ViewWindow::new(start as usize, end as usize) {
            Ok(window) => self.render(RenderMode::Panning(window)),
            Err(err) => RenderOutcome::failure(err.to_string()),
        }
    }

    /// Consumes one event from the interactive surface's gesture stream.
    ///
    /// Move events derive an explicit window from the gesture transform and
    /// dispatch a panning render; start/end only update interaction state.
    pub fn on_gesture(&mut self, event: GestureEvent) -> Option<RenderOutcome> {
        match event {
            GestureEvent::Started => {
                self.interaction.on_pan_start();
                None
            }
            GestureEvent::Moved(transform) => {
                self.interaction.on_pan_move(transform);
                let outcome = match self.gesture_window(transform) {
                    Ok(window) => self.render(RenderMode::Panning(window)),
                    Err(err) => RenderOutcome::failure(err.to_string()),
                };
                Some(outcome)
            }
            GestureEvent::Ended => {
                self.interaction.on_pan_end();
                None
            }
        }
    }

    fn gesture_window(&self, transform: ViewTransform) -> ChartResult<ViewWindow> {
        let transform = transform.validate()?.rounded();
        derive_window_from_transform(
            self.series.len(),
            self.config.window_size,
            self.band_width()?,
            transform.translate_x,
        )
    }

    /// Runs every queued edge load and reconciles lock state from the
    /// loader's completion signal. Returns the number of loads executed.
    pub fn drain_pending_loads<L: DataLoader>(&mut self, loader: &mut L) -> usize {
        let drained = self.queue.drain();
        let count = drained.len();
        for load in drained {
            let result = loader.load(load.direction);
            reconcile_load_result(&mut self.locks, load.direction, result);
        }
        count
    }

    pub(super) fn current_window(&self) -> ChartResult<ViewWindow> {
        match &self.last_state {
            Some(state) => state.window.clamped_to_len(self.series.len()),
            None => latest_window(self.series.len(), self.config.window_size),
        }
    }

    pub(super) fn band_width(&self) -> ChartResult<f64> {
        let (inner_width, _) = self.config.margins.inner_size(self.config.viewport)?;
        Ok(inner_width / self.config.window_size as f64)
    }
}
