use serde::{Deserialize, Serialize};

use crate::core::ViewWindow;

/// Policy flags governing one render operation.
///
/// Carried as data rather than scattered conditionals so a new mode is a
/// compile-time-checked addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPolicy {
    pub recompute_price_domain: bool,
    pub preserve_transform: bool,
    pub explicit_window: bool,
    pub trigger_edge_load: bool,
}

/// The closed set of render operations.
///
/// Panning and skip-to carry the exact index range the caller wants visible;
/// re-deriving it from a transform would be redundant and a source of
/// rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// First draw after data arrives.
    Initial,
    /// Gesture-driven pan with caller-supplied indices.
    Panning(ViewWindow),
    /// Programmatic jump to an index range.
    SkipTo(ViewWindow),
    /// Streaming append/replace arrived over the live feed.
    Streaming,
}

impl RenderMode {
    #[must_use]
    pub const fn policy(self) -> RenderPolicy {
        match self {
            Self::Initial => RenderPolicy {
                recompute_price_domain: true,
                preserve_transform: false,
                explicit_window: false,
                trigger_edge_load: true,
            },
            Self::Panning(_) => RenderPolicy {
                recompute_price_domain: true,
                preserve_transform: false,
                explicit_window: true,
                trigger_edge_load: false,
            },
            Self::SkipTo(_) => RenderPolicy {
                recompute_price_domain: true,
                preserve_transform: false,
                explicit_window: true,
                trigger_edge_load: true,
            },
            Self::Streaming => RenderPolicy {
                recompute_price_domain: true,
                preserve_transform: false,
                explicit_window: false,
                trigger_edge_load: true,
            },
        }
    }

    #[must_use]
    pub const fn explicit_window(self) -> Option<ViewWindow> {
        match self {
            Self::Panning(window) | Self::SkipTo(window) => Some(window),
            Self::Initial | Self::Streaming => None,
        }
    }
}
