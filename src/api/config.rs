use serde::{Deserialize, Serialize};

use crate::core::{Margins, PriceDomainPolicy, Viewport};
use crate::error::{ChartError, ChartResult};

/// Per-category entry ceilings for the computation cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCeilings {
    pub chart_state: usize,
    pub price_domain: usize,
    pub visible_window: usize,
    pub tick_marks: usize,
}

impl Default for CacheCeilings {
    fn default() -> Self {
        Self {
            chart_state: 64,
            price_domain: 128,
            visible_window: 128,
            tick_marks: 32,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    /// Number of bars filling the plot at 1:1 zoom.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Outward padding applied to dynamic price domains.
    #[serde(default = "default_price_padding_ratio")]
    pub price_padding_ratio: f64,
    /// Edge distance (in bars) at which auto-loading triggers.
    #[serde(default = "default_edge_threshold_bars")]
    pub edge_threshold_bars: usize,
    /// Extra bars materialized around the viewport by the drawing surface.
    #[serde(default = "default_render_buffer_bars")]
    pub render_buffer_bars: usize,
    #[serde(default)]
    pub price_domain_policy: PriceDomainPolicy,
    #[serde(default)]
    pub cache_ceilings: CacheCeilings,
}

impl ChartEngineConfig {
    /// Creates a config with default windowing and a dynamic price domain.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margins: Margins::default(),
            window_size: default_window_size(),
            price_padding_ratio: default_price_padding_ratio(),
            edge_threshold_bars: default_edge_threshold_bars(),
            render_buffer_bars: default_render_buffer_bars(),
            price_domain_policy: PriceDomainPolicy::default(),
            cache_ceilings: CacheCeilings::default(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    #[must_use]
    pub fn with_price_padding_ratio(mut self, ratio: f64) -> Self {
        self.price_padding_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_edge_threshold_bars(mut self, threshold: usize) -> Self {
        self.edge_threshold_bars = threshold;
        self
    }

    #[must_use]
    pub fn with_render_buffer_bars(mut self, buffer: usize) -> Self {
        self.render_buffer_bars = buffer;
        self
    }

    #[must_use]
    pub fn with_price_domain_policy(mut self, policy: PriceDomainPolicy) -> Self {
        self.price_domain_policy = policy;
        self
    }

    #[must_use]
    pub fn with_cache_ceilings(mut self, ceilings: CacheCeilings) -> Self {
        self.cache_ceilings = ceilings;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        // Margins are validated against the viewport as a pair.
        self.margins.inner_size(self.viewport)?;
        if self.window_size == 0 {
            return Err(ChartError::InvalidData(
                "window size must be >= 1".to_owned(),
            ));
        }
        if !self.price_padding_ratio.is_finite() || self.price_padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "price padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        self.price_domain_policy.validate()?;
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_window_size() -> usize {
    80
}

fn default_price_padding_ratio() -> f64 {
    0.05
}

fn default_edge_threshold_bars() -> usize {
    10
}

fn default_render_buffer_bars() -> usize {
    40
}
