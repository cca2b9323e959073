use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::OhlcBar;
use crate::core::primitives::price_to_nanos;
use crate::error::{ChartError, ChartResult};

/// Documented fallback applied when no data is available for a dynamic
/// domain. A visible default beats a NaN scale propagating downstream.
pub const DEFAULT_PRICE_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Half-span padding applied when every visible price is identical.
const FLAT_DOMAIN_HALF_SPAN: f64 = 1.0;

/// Whether the Y-axis range is locked or recomputed from visible data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PriceDomainPolicy {
    /// Locked scale; changes only on explicit recompute.
    Fixed { min: f64, max: f64 },
    /// Recomputed from the visible slice's low/high with outward padding.
    #[default]
    Dynamic,
}

/// Hashable identity of a domain policy for cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainFingerprint {
    Fixed { min_nanos: i64, max_nanos: i64 },
    Dynamic,
}

impl PriceDomainPolicy {
    pub fn validate(self) -> ChartResult<Self> {
        if let Self::Fixed { min, max } = self {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(ChartError::InvalidData(
                    "fixed price domain must be finite with min < max".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn fingerprint(self) -> DomainFingerprint {
        match self {
            Self::Fixed { min, max } => DomainFingerprint::Fixed {
                min_nanos: price_to_nanos(min),
                max_nanos: price_to_nanos(max),
            },
            Self::Dynamic => DomainFingerprint::Dynamic,
        }
    }
}

/// Resolves the Y-scale domain for a render operation.
///
/// Fixed policies pass through verbatim. Dynamic policies scan the given
/// slice for price extrema and expand both bounds outward by
/// `span * padding_ratio`; an empty slice falls back to
/// [`DEFAULT_PRICE_DOMAIN`].
pub fn resolve_price_domain(
    policy: PriceDomainPolicy,
    bars: &[OhlcBar],
    padding_ratio: f64,
) -> ChartResult<(f64, f64)> {
    if !padding_ratio.is_finite() || padding_ratio < 0.0 {
        return Err(ChartError::InvalidData(
            "price padding ratio must be finite and >= 0".to_owned(),
        ));
    }

    match policy.validate()? {
        PriceDomainPolicy::Fixed { min, max } => Ok((min, max)),
        PriceDomainPolicy::Dynamic => {
            if bars.is_empty() {
                return Ok(DEFAULT_PRICE_DOMAIN);
            }

            let min = bars
                .iter()
                .map(|bar| OrderedFloat(bar.low))
                .min()
                .map(OrderedFloat::into_inner)
                .unwrap_or(DEFAULT_PRICE_DOMAIN.0);
            let max = bars
                .iter()
                .map(|bar| OrderedFloat(bar.high))
                .max()
                .map(OrderedFloat::into_inner)
                .unwrap_or(DEFAULT_PRICE_DOMAIN.1);

            let span = max - min;
            let padding = if span == 0.0 {
                FLAT_DOMAIN_HALF_SPAN
            } else {
                span * padding_ratio
            };
            Ok((min - padding, max + padding))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PRICE_DOMAIN, PriceDomainPolicy, resolve_price_domain};
    use crate::core::OhlcBar;

    fn bar(low: f64, high: f64) -> OhlcBar {
        OhlcBar::new(0.0, low, high, low, high, 1).expect("valid bar")
    }

    #[test]
    fn fixed_domain_passes_through_verbatim() {
        let domain = resolve_price_domain(
            PriceDomainPolicy::Fixed { min: 50.0, max: 150.0 },
            &[bar(1.0, 2.0)],
            0.05,
        )
        .expect("domain");
        assert_eq!(domain, (50.0, 150.0));
    }

    #[test]
    fn empty_slice_falls_back_to_default_domain() {
        let domain =
            resolve_price_domain(PriceDomainPolicy::Dynamic, &[], 0.05).expect("domain");
        assert_eq!(domain, DEFAULT_PRICE_DOMAIN);
    }

    #[test]
    fn dynamic_domain_pads_extrema_outward() {
        let domain = resolve_price_domain(
            PriceDomainPolicy::Dynamic,
            &[bar(100.0, 110.0), bar(95.0, 105.0)],
            0.1,
        )
        .expect("domain");
        assert!((domain.0 - 93.5).abs() <= 1e-9);
        assert!((domain.1 - 111.5).abs() <= 1e-9);
    }

    #[test]
    fn flat_prices_widen_by_fixed_half_span() {
        let domain = resolve_price_domain(PriceDomainPolicy::Dynamic, &[bar(100.0, 100.0)], 0.1)
            .expect("domain");
        assert_eq!(domain, (99.0, 101.0));
    }

    #[test]
    fn fixed_domain_rejects_inverted_bounds() {
        assert!(PriceDomainPolicy::Fixed { min: 10.0, max: 5.0 }.validate().is_err());
    }
}
