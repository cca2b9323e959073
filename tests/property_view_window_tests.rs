use candleview::api::compute_chart_state;
use candleview::core::{
    BarSeries, Margins, OhlcBar, PriceDomainPolicy, ViewTransform, ViewWindow, Viewport,
    buffered_render_range, derive_window_from_transform,
};
use candleview::ChartEngineConfig;
use proptest::prelude::*;

fn build_series(len: usize) -> BarSeries {
    let bars: Vec<_> = (0..len)
        .map(|i| {
            let base = 50.0 + (i % 7) as f64;
            OhlcBar::new(60.0 * i as f64, base, base + 1.5, base - 1.5, base, 1)
                .expect("valid bar")
        })
        .collect();
    BarSeries::from_bars(bars).expect("series")
}

proptest! {
    #[test]
    fn derived_window_stays_inside_series_bounds(
        len in 1usize..4_000,
        window_size in 1usize..300,
        band_width in 0.5f64..50.0,
        translate_x in -1.0e6f64..1.0e6
    ) {
        let window = derive_window_from_transform(len, window_size, band_width, translate_x)
            .expect("window");

        prop_assert!(window.start() <= window.end());
        prop_assert!(window.end() <= len - 1);
        prop_assert!(window.len() <= window_size.max(1));
    }

    #[test]
    fn calculator_upholds_bounds_invariant(
        len in 1usize..600,
        translate_x in -50_000.0f64..50_000.0,
        translate_y in -500.0f64..500.0,
        scale in 0.1f64..10.0
    ) {
        let series = build_series(len);
        let config = ChartEngineConfig::new(Viewport::new(1280, 720)).with_margins(Margins {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        });

        let state = compute_chart_state(
            &config,
            &series,
            ViewTransform::new(translate_x, translate_y, scale),
            PriceDomainPolicy::Dynamic,
        )
        .expect("state");

        prop_assert!(state.window.start() <= state.window.end());
        prop_assert!(state.window.end() <= len - 1);
        prop_assert_eq!(state.visible.len(), state.window.len());

        let (min, max) = state.price_domain();
        prop_assert!(min.is_finite() && max.is_finite() && min < max);
    }

    #[test]
    fn buffered_range_contains_expanded_window_and_stays_clamped(
        len in 1usize..3_000,
        start_ratio in 0.0f64..1.0,
        span in 0usize..200,
        window_size in 1usize..120,
        buffer in 0usize..100
    ) {
        let last = len - 1;
        let start = ((last as f64) * start_ratio) as usize;
        let end = (start + span).min(last);
        let window = ViewWindow::new(start, end).expect("window");

        let range = buffered_render_range(window, len, window_size, buffer).expect("range");

        prop_assert!(range.start() <= range.end());
        prop_assert!(range.end() <= last);
        // Buffering only widens; it never loses visible bars.
        prop_assert!(range.start() <= start);
        prop_assert!(range.end() >= end.min(last));
    }
}
