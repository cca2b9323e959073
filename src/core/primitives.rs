use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Quantizes a time value in seconds to whole milliseconds for cache keys.
#[must_use]
pub fn unix_seconds_to_millis(time: f64) -> i64 {
    if !time.is_finite() {
        return 0;
    }
    let millis = (time * 1000.0).round();
    if millis > (i64::MAX as f64) {
        i64::MAX
    } else if millis < (i64::MIN as f64) {
        i64::MIN
    } else {
        millis as i64
    }
}

/// Quantizes a price to nanos so domain bounds can participate in hashed keys.
#[must_use]
pub fn price_to_nanos(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let nanos = (value * 1_000_000_000.0).round();
    if nanos > (i64::MAX as f64) {
        i64::MAX
    } else if nanos < (i64::MIN as f64) {
        i64::MIN
    } else {
        nanos as i64
    }
}

/// Rounds a transform component to two decimals so continuous gesture jitter
/// does not produce a unique value per animation frame.
#[must_use]
pub fn round_to_centi(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{round_to_centi, unix_seconds_to_millis};

    #[test]
    fn centi_rounding_collapses_gesture_jitter() {
        assert_eq!(round_to_centi(12.34501), 12.35);
        assert_eq!(round_to_centi(12.3449), 12.34);
        assert_eq!(round_to_centi(f64::NAN), 0.0);
    }

    #[test]
    fn millis_quantization_round_trips_whole_seconds() {
        assert_eq!(unix_seconds_to_millis(1_700_000_000.0), 1_700_000_000_000);
    }
}
