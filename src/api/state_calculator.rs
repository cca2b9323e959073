use tracing::trace;

use crate::api::chart_state::ChartState;
use crate::api::config::ChartEngineConfig;
use crate::api::memo_cache::{ComputeCache, DomainKey, StateKey, WindowKey};
use crate::core::{
    BarSeries, LinearScale, PriceDomainPolicy, ViewTransform, ViewWindow,
    derive_window_from_transform, resolve_price_domain,
};
use crate::error::{ChartError, ChartResult};

/// Shared right-aligned plot geometry for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotGeometry {
    inner_width: f64,
    inner_height: f64,
    band_width: f64,
    base_x: LinearScale,
}

fn base_geometry(config: &ChartEngineConfig, len: usize) -> ChartResult<PlotGeometry> {
    let (inner_width, inner_height) = config.margins.inner_size(config.viewport)?;
    if config.window_size == 0 {
        return Err(ChartError::InvalidData(
            "window size must be >= 1".to_owned(),
        ));
    }

    let band_width = inner_width / config.window_size as f64;

    // Right-align: the newest bar lands at the plot's right edge before any
    // pan; everything older extends leftward, off-screen once the dataset
    // outgrows the window.
    let rightmost = inner_width;
    let total_data_width = len as f64 * band_width;
    let leftmost = rightmost - total_data_width;
    let base_x = LinearScale::new((0.0, (len - 1) as f64), (leftmost, rightmost))?;

    Ok(PlotGeometry {
        inner_width,
        inner_height,
        band_width,
        base_x,
    })
}

fn build_state(
    config: &ChartEngineConfig,
    series: &BarSeries,
    window: ViewWindow,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
    geometry: PlotGeometry,
) -> ChartResult<ChartState> {
    let window = window.clamped_to_len(series.len())?;
    let visible = series.slice(window).to_vec();

    let domain = resolve_price_domain(policy, &visible, config.price_padding_ratio)?;
    let base_y = LinearScale::new(domain, (geometry.inner_height, 0.0))?;

    Ok(ChartState {
        inner_width: geometry.inner_width,
        inner_height: geometry.inner_height,
        base_x: geometry.base_x,
        base_y,
        transformed_x: geometry.base_x.rescaled_x(transform),
        transformed_y: base_y.rescaled_y(transform),
        window,
        visible,
        transform_string: transform.transform_string(),
    })
}

/// Computes chart state with the visible window derived from the transform
/// (§ algorithm steps 1-9). Deterministic given identical coarse inputs: the
/// transform is rounded to two decimals before any arithmetic.
pub fn compute_chart_state(
    config: &ChartEngineConfig,
    series: &BarSeries,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
) -> ChartResult<ChartState> {
    if series.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let transform = transform.validate()?.rounded();
    let geometry = base_geometry(config, series.len())?;
    let window = derive_window_from_transform(
        series.len(),
        config.window_size,
        geometry.band_width,
        transform.translate_x,
    )?;
    build_state(config, series, window, transform, policy, geometry)
}

/// Computes chart state for an operation that already knows its index range
/// (panning, skip-to). Steps 4-5 of the derivation are bypassed; everything
/// else is identical, so explicit and derived paths cannot drift apart.
pub fn compute_chart_state_with_window(
    config: &ChartEngineConfig,
    series: &BarSeries,
    window: ViewWindow,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
) -> ChartResult<ChartState> {
    if series.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let transform = transform.validate()?.rounded();
    let geometry = base_geometry(config, series.len())?;
    build_state(config, series, window, transform, policy, geometry)
}

fn state_key(
    config: &ChartEngineConfig,
    series: &BarSeries,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
    window: Option<ViewWindow>,
) -> StateKey {
    StateKey {
        series: series.fingerprint(),
        width: config.viewport.width,
        height: config.viewport.height,
        transform: transform.quantized(),
        domain: policy.fingerprint(),
        window: window.map(|w| (w.start(), w.end())),
    }
}

fn padding_centi(ratio: f64) -> i64 {
    (ratio * 100.0).round() as i64
}

/// Cache-aware variant of [`compute_chart_state`]. The cache stores the
/// finished state keyed by the full coarse fingerprint, plus the derived
/// window and resolved domain under their own categories so partial reuse
/// survives chart-state eviction.
pub fn compute_chart_state_cached(
    cache: &mut ComputeCache,
    config: &ChartEngineConfig,
    series: &BarSeries,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
) -> ChartResult<ChartState> {
    if series.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let transform = transform.validate()?.rounded();

    let key = state_key(config, series, transform, policy, None);
    if let Some(state) = cache.get_chart_state(&key) {
        trace!("chart state cache hit (derived window)");
        return Ok(state);
    }

    let geometry = base_geometry(config, series.len())?;
    let window_key = WindowKey {
        series: series.fingerprint(),
        window_size: config.window_size,
        band_width_centi: (geometry.band_width * 100.0).round() as i64,
        translate_x_centi: transform.quantized().translate_x_centi,
    };
    let window = match cache.get_visible_window(&window_key) {
        Some(window) => window,
        None => {
            let window = derive_window_from_transform(
                series.len(),
                config.window_size,
                geometry.band_width,
                transform.translate_x,
            )?;
            cache.put_visible_window(window_key, window);
            window
        }
    };

    let state = build_state_with_domain_cache(
        cache, config, series, window, transform, policy, geometry,
    )?;
    cache.put_chart_state(key, state.clone());
    Ok(state)
}

/// Cache-aware variant of [`compute_chart_state_with_window`].
pub fn compute_chart_state_with_window_cached(
    cache: &mut ComputeCache,
    config: &ChartEngineConfig,
    series: &BarSeries,
    window: ViewWindow,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
) -> ChartResult<ChartState> {
    if series.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let transform = transform.validate()?.rounded();
    let window = window.clamped_to_len(series.len())?;

    let key = state_key(config, series, transform, policy, Some(window));
    if let Some(state) = cache.get_chart_state(&key) {
        trace!("chart state cache hit (explicit window)");
        return Ok(state);
    }

    let geometry = base_geometry(config, series.len())?;
    let state = build_state_with_domain_cache(
        cache, config, series, window, transform, policy, geometry,
    )?;
    cache.put_chart_state(key, state.clone());
    Ok(state)
}

fn build_state_with_domain_cache(
    cache: &mut ComputeCache,
    config: &ChartEngineConfig,
    series: &BarSeries,
    window: ViewWindow,
    transform: ViewTransform,
    policy: PriceDomainPolicy,
    geometry: PlotGeometry,
) -> ChartResult<ChartState> {
    let window = window.clamped_to_len(series.len())?;
    let visible = series.slice(window).to_vec();

    let domain_key = DomainKey {
        series: series.fingerprint(),
        window: (window.start(), window.end()),
        domain: policy.fingerprint(),
        padding_centi: padding_centi(config.price_padding_ratio),
    };
    let domain = match cache.get_price_domain(&domain_key) {
        Some(domain) => domain,
        None => {
            let domain = resolve_price_domain(policy, &visible, config.price_padding_ratio)?;
            cache.put_price_domain(domain_key, domain);
            domain
        }
    };

    let base_y = LinearScale::new(domain, (geometry.inner_height, 0.0))?;

    Ok(ChartState {
        inner_width: geometry.inner_width,
        inner_height: geometry.inner_height,
        base_x: geometry.base_x,
        base_y,
        transformed_x: geometry.base_x.rescaled_x(transform),
        transformed_y: base_y.rescaled_y(transform),
        window,
        visible,
        transform_string: transform.transform_string(),
    })
}
