use indexmap::IndexMap;

use crate::api::ChartState;
use crate::api::config::CacheCeilings;
use crate::core::dataset::SeriesFingerprint;
use crate::core::price_domain::DomainFingerprint;
use crate::core::transform::QuantizedTransform;
use crate::core::view_window::ViewWindow;

/// Cache categories tracked with independent ceilings and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCategory {
    ChartState,
    PriceDomain,
    VisibleWindow,
    TickMarks,
}

/// Runtime metrics exposed per cache category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Full fingerprint of one chart-state computation.
///
/// Coarse by design: the series contributes length plus edge timestamps, the
/// transform is pre-rounded to two decimals, and fixed domains are quantized
/// to nanos. Key construction stays O(1) regardless of dataset size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub series: SeriesFingerprint,
    pub width: u32,
    pub height: u32,
    pub transform: QuantizedTransform,
    pub domain: DomainFingerprint,
    /// Present for explicit-window operations (panning, skip-to).
    pub window: Option<(usize, usize)>,
}

/// Fingerprint of a resolved price domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainKey {
    pub series: SeriesFingerprint,
    pub window: (usize, usize),
    pub domain: DomainFingerprint,
    pub padding_centi: i64,
}

/// Fingerprint of a transform-derived visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowKey {
    pub series: SeriesFingerprint,
    pub window_size: usize,
    pub band_width_centi: i64,
    pub translate_x_centi: i64,
}

/// Fingerprint of an interval-mark computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickKey {
    pub series: SeriesFingerprint,
    pub interval_millis: i64,
}

/// Bounded key/value store backing every expensive calculation.
///
/// Eviction removes the oldest 25% of a category (insertion order, not LRU)
/// once its ceiling is exceeded; correctness lives entirely in the key
/// fingerprints, so eviction optimality is deliberately cheap. `clear()` is
/// the wholesale reset used on dataset replacement and in tests.
#[derive(Debug, Default)]
pub struct ComputeCache {
    ceilings: CacheCeilings,
    chart_states: IndexMap<StateKey, ChartState>,
    price_domains: IndexMap<DomainKey, (f64, f64)>,
    visible_windows: IndexMap<WindowKey, ViewWindow>,
    tick_marks: IndexMap<TickKey, Vec<f64>>,
    chart_state_stats: CacheStats,
    price_domain_stats: CacheStats,
    visible_window_stats: CacheStats,
    tick_mark_stats: CacheStats,
}

impl ComputeCache {
    #[must_use]
    pub fn new(ceilings: CacheCeilings) -> Self {
        Self {
            ceilings,
            ..Self::default()
        }
    }

    pub fn get_chart_state(&mut self, key: &StateKey) -> Option<ChartState> {
        let value = self.chart_states.get(key).cloned();
        if value.is_some() {
            self.chart_state_stats.hits += 1;
        }
        value
    }

    pub fn put_chart_state(&mut self, key: StateKey, value: ChartState) {
        self.chart_state_stats.misses += 1;
        self.chart_states.insert(key, value);
        evict_oldest_quarter(&mut self.chart_states, self.ceilings.chart_state);
    }

    pub fn get_price_domain(&mut self, key: &DomainKey) -> Option<(f64, f64)> {
        let value = self.price_domains.get(key).copied();
        if value.is_some() {
            self.price_domain_stats.hits += 1;
        }
        value
    }

    pub fn put_price_domain(&mut self, key: DomainKey, value: (f64, f64)) {
        self.price_domain_stats.misses += 1;
        self.price_domains.insert(key, value);
        evict_oldest_quarter(&mut self.price_domains, self.ceilings.price_domain);
    }

    pub fn get_visible_window(&mut self, key: &WindowKey) -> Option<ViewWindow> {
        let value = self.visible_windows.get(key).copied();
        if value.is_some() {
            self.visible_window_stats.hits += 1;
        }
        value
    }

    pub fn put_visible_window(&mut self, key: WindowKey, value: ViewWindow) {
        self.visible_window_stats.misses += 1;
        self.visible_windows.insert(key, value);
        evict_oldest_quarter(&mut self.visible_windows, self.ceilings.visible_window);
    }

    pub fn get_tick_marks(&mut self, key: &TickKey) -> Option<Vec<f64>> {
        let value = self.tick_marks.get(key).cloned();
        if value.is_some() {
            self.tick_mark_stats.hits += 1;
        }
        value
    }

    pub fn put_tick_marks(&mut self, key: TickKey, value: Vec<f64>) {
        self.tick_mark_stats.misses += 1;
        self.tick_marks.insert(key, value);
        evict_oldest_quarter(&mut self.tick_marks, self.ceilings.tick_marks);
    }

    /// Wholesale reset; the documented mitigation for suspected staleness.
    pub fn clear(&mut self) {
        self.chart_states.clear();
        self.price_domains.clear();
        self.visible_windows.clear();
        self.tick_marks.clear();
    }

    #[must_use]
    pub fn stats(&self, category: CacheCategory) -> CacheStats {
        match category {
            CacheCategory::ChartState => CacheStats {
                size: self.chart_states.len(),
                ..self.chart_state_stats
            },
            CacheCategory::PriceDomain => CacheStats {
                size: self.price_domains.len(),
                ..self.price_domain_stats
            },
            CacheCategory::VisibleWindow => CacheStats {
                size: self.visible_windows.len(),
                ..self.visible_window_stats
            },
            CacheCategory::TickMarks => CacheStats {
                size: self.tick_marks.len(),
                ..self.tick_mark_stats
            },
        }
    }
}

fn evict_oldest_quarter<K, V>(map: &mut IndexMap<K, V>, ceiling: usize)
where
    K: std::hash::Hash + Eq,
{
    if ceiling == 0 || map.len() <= ceiling {
        return;
    }
    let drop = (map.len() / 4).max(1);
    map.drain(0..drop);
}

#[cfg(test)]
mod tests {
    use super::{CacheCategory, ComputeCache, TickKey};
    use crate::api::config::CacheCeilings;
    use crate::core::dataset::SeriesFingerprint;

    fn tick_key(series_len: usize, interval: i64) -> TickKey {
        TickKey {
            series: SeriesFingerprint {
                len: series_len,
                first_time_millis: 0,
                last_time_millis: series_len as i64 * 1_000,
            },
            interval_millis: interval,
        }
    }

    #[test]
    fn hit_and_miss_counters_track_usage() {
        let mut cache = ComputeCache::default();
        let key = tick_key(10, 60_000);
        assert!(cache.get_tick_marks(&key).is_none());

        cache.put_tick_marks(key, vec![0.0, 60.0]);
        assert_eq!(cache.get_tick_marks(&key), Some(vec![0.0, 60.0]));

        let stats = cache.stats(CacheCategory::TickMarks);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn exceeding_ceiling_evicts_oldest_quarter() {
        let ceilings = CacheCeilings {
            tick_marks: 8,
            ..CacheCeilings::default()
        };
        let mut cache = ComputeCache::new(ceilings);

        for i in 0..9 {
            cache.put_tick_marks(tick_key(i, 60_000), vec![i as f64]);
        }

        // 9 entries over an 8-entry ceiling drops the oldest quarter (2).
        let stats = cache.stats(CacheCategory::TickMarks);
        assert_eq!(stats.size, 7);
        assert!(cache.get_tick_marks(&tick_key(0, 60_000)).is_none());
        assert!(cache.get_tick_marks(&tick_key(8, 60_000)).is_some());
    }

    #[test]
    fn clear_resets_every_category() {
        let mut cache = ComputeCache::default();
        cache.put_tick_marks(tick_key(10, 60_000), vec![0.0]);
        cache.clear();
        assert_eq!(cache.stats(CacheCategory::TickMarks).size, 0);
    }
}
