pub mod bar;
pub mod dataset;
pub mod price_domain;
pub mod primitives;
pub mod scale;
pub mod time_marks;
pub mod transform;
pub mod types;
pub mod view_window;

pub use bar::OhlcBar;
pub use dataset::{BarSeries, SeriesFingerprint, StreamApplied};
pub use price_domain::{DEFAULT_PRICE_DOMAIN, PriceDomainPolicy, resolve_price_domain};
pub use scale::LinearScale;
pub use time_marks::{interval_mark_indices, interval_marks};
pub use transform::{QuantizedTransform, ViewTransform};
pub use types::{Margins, Viewport};
pub use view_window::{
    ViewWindow, buffered_render_range, derive_window_from_transform, expand_to_window_size,
    latest_window,
};
