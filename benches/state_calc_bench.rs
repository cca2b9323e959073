use candleview::api::{ComputeCache, compute_chart_state, compute_chart_state_cached};
use candleview::core::{BarSeries, Margins, OhlcBar, PriceDomainPolicy, ViewTransform, Viewport};
use candleview::ChartEngineConfig;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn build_series(len: usize) -> BarSeries {
    let bars: Vec<OhlcBar> = (0..len)
        .map(|i| {
            let t = 60.0 * i as f64;
            let base = 100.0 + (i % 23) as f64 * 0.5;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            OhlcBar::new(t, open, high, low, close, 1_000).expect("valid generated bar")
        })
        .collect();
    BarSeries::from_bars(bars).expect("ordered series")
}

fn bench_config() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(1920, 1080)).with_margins(Margins {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    })
}

fn bench_chart_state_10k(c: &mut Criterion) {
    let series = build_series(10_000);
    let config = bench_config();
    let transform = ViewTransform::new(240.0, 0.0, 1.0);

    c.bench_function("chart_state_10k_uncached", |b| {
        b.iter(|| {
            let state = compute_chart_state(
                black_box(&config),
                black_box(&series),
                black_box(transform),
                black_box(PriceDomainPolicy::Dynamic),
            )
            .expect("state");
            black_box(state)
        })
    });
}

fn bench_chart_state_10k_cache_hit(c: &mut Criterion) {
    let series = build_series(10_000);
    let config = bench_config();
    let transform = ViewTransform::new(240.0, 0.0, 1.0);
    let mut cache = ComputeCache::default();

    // Warm the entry so the loop measures pure hit cost.
    compute_chart_state_cached(
        &mut cache,
        &config,
        &series,
        transform,
        PriceDomainPolicy::Dynamic,
    )
    .expect("warm state");

    c.bench_function("chart_state_10k_cache_hit", |b| {
        b.iter(|| {
            let state = compute_chart_state_cached(
                black_box(&mut cache),
                black_box(&config),
                black_box(&series),
                black_box(transform),
                black_box(PriceDomainPolicy::Dynamic),
            )
            .expect("state");
            black_box(state)
        })
    });
}

fn bench_pan_sweep_2k(c: &mut Criterion) {
    let series = build_series(2_000);
    let config = bench_config();
    let mut cache = ComputeCache::default();

    c.bench_function("pan_sweep_2k_cached", |b| {
        let mut tick = 0u64;
        b.iter(|| {
            // A gesture sweep revisits nearby offsets; quantization folds
            // most frames onto existing entries.
            let translate_x = ((tick % 64) as f64) * 12.5;
            tick += 1;
            let state = compute_chart_state_cached(
                &mut cache,
                &config,
                &series,
                ViewTransform::new(translate_x, 0.0, 1.0),
                PriceDomainPolicy::Dynamic,
            )
            .expect("state");
            black_box(state)
        })
    });
}

criterion_group!(
    benches,
    bench_chart_state_10k,
    bench_chart_state_10k_cache_hit,
    bench_pan_sweep_2k
);
criterion_main!(benches);
