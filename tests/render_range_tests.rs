use candleview::core::{
    Margins, OhlcBar, ViewWindow, Viewport, buffered_render_range, expand_to_window_size,
};
use candleview::render::NullSurface;
use candleview::{ChartEngine, ChartEngineConfig};

fn window(start: usize, end: usize) -> ViewWindow {
    ViewWindow::new(start, end).expect("valid window")
}

#[test]
fn collapsed_viewport_expands_to_centered_window() {
    // Length 1200, viewport collapsed to index 600, nominal window 80.
    let expanded = expand_to_window_size(ViewWindow::single(600), 1200, 80).expect("window");
    assert_eq!((expanded.start(), expanded.end()), (560, 639));
    assert_eq!(expanded.len(), 80);
}

#[test]
fn expansion_near_bounds_shifts_instead_of_clipping() {
    let at_tail = expand_to_window_size(ViewWindow::single(1198), 1200, 80).expect("window");
    assert_eq!((at_tail.start(), at_tail.end()), (1120, 1199));

    let at_head = expand_to_window_size(ViewWindow::single(1), 1200, 80).expect("window");
    assert_eq!((at_head.start(), at_head.end()), (0, 79));
}

#[test]
fn expansion_is_identity_for_full_windows() {
    let full = window(100, 199);
    let expanded = expand_to_window_size(full, 1200, 80).expect("window");
    assert_eq!(expanded, full);
}

#[test]
fn interior_window_buffers_both_directions() {
    let range = buffered_render_range(window(500, 579), 1200, 80, 40).expect("range");
    assert_eq!((range.start(), range.end()), (460, 619));
}

#[test]
fn window_touching_start_buffers_forward_only() {
    let range = buffered_render_range(window(0, 79), 1200, 80, 40).expect("range");
    assert_eq!((range.start(), range.end()), (0, 119));
}

#[test]
fn window_touching_end_buffers_backward_only() {
    let range = buffered_render_range(window(1120, 1199), 1200, 80, 40).expect("range");
    assert_eq!((range.start(), range.end()), (1080, 1199));
}

#[test]
fn window_touching_both_edges_covers_full_series() {
    let range = buffered_render_range(window(0, 49), 50, 80, 40).expect("range");
    assert_eq!((range.start(), range.end()), (0, 49));
}

#[test]
fn buffer_clamps_at_series_bounds() {
    let range = buffered_render_range(window(10, 89), 1200, 80, 40).expect("range");
    assert_eq!((range.start(), range.end()), (0, 129));
}

#[test]
fn engine_exposes_buffered_window_for_last_render() {
    let config = ChartEngineConfig::new(Viewport::new(1000, 500))
        .with_margins(Margins {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        })
        .with_render_buffer_bars(40);
    let mut engine = ChartEngine::new(NullSurface::default(), config).expect("engine init");
    let bars: Vec<OhlcBar> = (0..1200)
        .map(|i| {
            OhlcBar::new(60.0 * i as f64, 100.0, 102.0, 98.0, 101.0, 10).expect("valid bar")
        })
        .collect();
    engine.set_bars(bars).expect("set bars");

    assert!(engine.render_skip_to(window(500, 579)).success);
    let buffered = engine.buffered_render_window().expect("buffered");
    assert_eq!((buffered.start(), buffered.end()), (460, 619));

    // The last render's window drives the range; at the tail the buffer only
    // extends backward.
    assert!(engine.skip_to_latest().success);
    let buffered = engine.buffered_render_window().expect("buffered");
    assert_eq!((buffered.start(), buffered.end()), (1080, 1199));
}
