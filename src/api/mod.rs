pub mod chart_state;
pub mod config;
pub mod dispatcher;
pub mod edge_loader;
pub mod engine;
mod engine_accessors;
pub mod memo_cache;
pub mod render_mode;
pub mod state_calculator;
pub mod task_queue;

pub use chart_state::ChartState;
pub use config::{CacheCeilings, ChartEngineConfig};
pub use dispatcher::{RenderOptions, RenderOutcome};
pub use edge_loader::{
    DataLoader, EdgeLockState, LoadDirection, check_edges, reconcile_load_result,
};
pub use engine::ChartEngine;
pub use memo_cache::{
    CacheCategory, CacheStats, ComputeCache, DomainKey, StateKey, TickKey, WindowKey,
};
pub use render_mode::{RenderMode, RenderPolicy};
pub use state_calculator::{
    compute_chart_state, compute_chart_state_cached, compute_chart_state_with_window,
    compute_chart_state_with_window_cached,
};
pub use task_queue::{DeferredTaskQueue, PendingLoad};
