use tracing::trace;

use crate::api::chart_state::ChartState;
use crate::api::edge_loader::check_edges;
use crate::api::engine::ChartEngine;
use crate::api::render_mode::RenderMode;
use crate::api::state_calculator::{
    compute_chart_state_cached, compute_chart_state_with_window_cached,
};
use crate::core::PriceDomainPolicy;
use crate::error::ChartError;
use crate::render::{ClipRegion, DrawSurface};

/// Structured result of one render operation.
///
/// Failures are values, not exceptions: callers branch on `success` without
/// exception-handling machinery, and the engine's previous chart state is
/// retained whenever `success` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub success: bool,
    pub state: Option<ChartState>,
    pub error: Option<String>,
    pub y_domain_recomputed: bool,
    pub new_fixed_domain: Option<(f64, f64)>,
}

impl RenderOutcome {
    #[must_use]
    pub(crate) fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            state: None,
            error: Some(error.into()),
            y_domain_recomputed: false,
            new_fixed_domain: None,
        }
    }
}

/// Per-call overrides for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Skips the edge check even for modes that normally trigger it.
    pub suppress_edge_load: bool,
}

impl<S: DrawSurface> ChartEngine<S> {
    pub fn render(&mut self, mode: RenderMode) -> RenderOutcome {
        self.render_with_options(mode, RenderOptions::default())
    }

    /// Dispatches one render operation.
    ///
    /// Stage order is fixed: validate, apply mode policy, calculate
    /// (cache-checked), update the surface clip region, draw, edge-check.
    /// Each stage consumes the prior stage's output; no reordering.
    pub fn render_with_options(&mut self, mode: RenderMode, options: RenderOptions) -> RenderOutcome {
        if self.surface.is_none() {
            return RenderOutcome::failure(ChartError::MissingSurface.to_string());
        }
        if self.series.is_empty() {
            return RenderOutcome::failure(ChartError::EmptyDataset.to_string());
        }

        let policy = mode.policy();
        if !policy.preserve_transform {
            self.interaction.reset_transform();
        }
        let transform = self.interaction.transform();

        // A mode that skipped domain recomputation would reuse the last
        // resolved domain as a locked scale; the current policy table
        // recomputes on every mode.
        let domain_policy = if policy.recompute_price_domain {
            self.config.price_domain_policy
        } else {
            match self.last_resolved_domain {
                Some((min, max)) => PriceDomainPolicy::Fixed { min, max },
                None => self.config.price_domain_policy,
            }
        };

        let computed = match mode.explicit_window() {
            Some(window) => compute_chart_state_with_window_cached(
                &mut self.cache,
                &self.config,
                &self.series,
                window,
                transform,
                domain_policy,
            ),
            None => compute_chart_state_cached(
                &mut self.cache,
                &self.config,
                &self.series,
                transform,
                domain_policy,
            ),
        };
        let state = match computed {
            Ok(state) => state,
            Err(err) => return RenderOutcome::failure(err.to_string()),
        };

        // The clip region always tracks the (possibly grown) dataset extent
        // before any mark is drawn.
        let clip = clip_region_for(&state);
        let Some(surface) = self.surface.as_mut() else {
            return RenderOutcome::failure(ChartError::MissingSurface.to_string());
        };
        if let Err(err) = surface.set_clip_region(clip) {
            return RenderOutcome::failure(err.to_string());
        }
        if let Err(err) = surface.draw(&state) {
            return RenderOutcome::failure(err.to_string());
        }

        let new_fixed_domain = if policy.recompute_price_domain
            && matches!(self.config.price_domain_policy, PriceDomainPolicy::Dynamic)
        {
            Some(state.price_domain())
        } else {
            None
        };
        self.last_resolved_domain = Some(state.price_domain());
        self.last_state = Some(state.clone());

        if policy.trigger_edge_load && !options.suppress_edge_load {
            check_edges(
                &mut self.locks,
                state.window,
                self.series.len(),
                self.config.edge_threshold_bars,
                &mut self.queue,
            );
        } else {
            trace!(?mode, "edge check skipped for this dispatch");
        }

        RenderOutcome {
            success: true,
            state: Some(state),
            error: None,
            y_domain_recomputed: policy.recompute_price_domain,
            new_fixed_domain,
        }
    }
}

fn clip_region_for(state: &ChartState) -> ClipRegion {
    let (left, right) = state.base_x.range();
    ClipRegion {
        x: left,
        y: 0.0,
        width: right - left,
        height: state.inner_height,
    }
}
