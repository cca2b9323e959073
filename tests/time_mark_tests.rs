use candleview::api::CacheCategory;
use candleview::core::{OhlcBar, Viewport, interval_marks};
use candleview::render::NullSurface;
use candleview::{ChartEngine, ChartEngineConfig};
use chrono::{TimeZone, Utc};

const DAY_SECONDS: f64 = 86_400.0;

fn trading_day_bar(year: i32, month: u32, day: u32) -> OhlcBar {
    let time = Utc
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
        .timestamp() as f64;
    OhlcBar::new(time, 100.0, 102.0, 98.0, 101.0, 1_000).expect("valid bar")
}

fn timestamp(year: i32, month: u32, day: u32) -> f64 {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
        .timestamp() as f64
}

#[test]
fn two_day_marks_anchor_to_data_start_across_weekends() {
    // Trading days 2025-09-01 .. 2025-09-19, weekends skipped.
    let days = [1, 2, 3, 4, 5, 8, 9, 10, 11, 12, 15, 16, 17, 18, 19];
    let bars: Vec<OhlcBar> = days
        .iter()
        .map(|&day| trading_day_bar(2025, 9, day))
        .collect();

    let marks = interval_marks(&bars, 2.0 * DAY_SECONDS).expect("marks");

    // Anchored to the data's own first bar, stepping over weekend gaps to
    // the next available trading day; not aligned to calendar boundaries.
    let expected: Vec<f64> = [1, 3, 5, 8, 10, 12, 15, 17]
        .iter()
        .map(|&day| timestamp(2025, 9, day))
        .collect();
    assert_eq!(marks.len(), 8);
    assert_eq!(marks, expected);
}

#[test]
fn marks_are_empty_for_empty_series() {
    let marks = interval_marks(&[], DAY_SECONDS).expect("marks");
    assert!(marks.is_empty());
}

#[test]
fn engine_caches_mark_computation_per_series_and_interval() {
    let mut engine = ChartEngine::new(
        NullSurface::default(),
        ChartEngineConfig::new(Viewport::new(1000, 500)),
    )
    .expect("engine init");
    let days = [1, 2, 3, 4, 5, 8, 9, 10, 11, 12];
    engine
        .set_bars(
            days.iter()
                .map(|&day| trading_day_bar(2025, 9, day))
                .collect(),
        )
        .expect("set bars");

    let first = engine.interval_marks(2.0 * DAY_SECONDS).expect("marks");
    let second = engine.interval_marks(2.0 * DAY_SECONDS).expect("marks");
    assert_eq!(first, second);

    let stats = engine.cache_stats(CacheCategory::TickMarks);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);

    // A different interval is a different fingerprint.
    let daily = engine.interval_marks(DAY_SECONDS).expect("marks");
    assert_ne!(daily, first);
    assert_eq!(engine.cache_stats(CacheCategory::TickMarks).size, 2);
}

#[test]
fn appending_a_bar_invalidates_mark_fingerprint() {
    let mut engine = ChartEngine::new(
        NullSurface::default(),
        ChartEngineConfig::new(Viewport::new(1000, 500)),
    )
    .expect("engine init");
    let days = [1, 2, 3, 4, 5, 8, 9, 10];
    engine
        .set_bars(
            days.iter()
                .map(|&day| trading_day_bar(2025, 9, day))
                .collect(),
        )
        .expect("set bars");

    let before = engine.interval_marks(2.0 * DAY_SECONDS).expect("marks");
    engine
        .append_bar(trading_day_bar(2025, 9, 11))
        .expect("append");
    let after = engine.interval_marks(2.0 * DAY_SECONDS).expect("marks");

    // Day 10 was previously the newest bar (no interval mark); growth makes
    // it eligible.
    assert!(after.len() > before.len());
    assert_eq!(engine.cache_stats(CacheCategory::TickMarks).misses, 2);
}
