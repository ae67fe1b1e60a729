//! LoRa symbol timing and duration assembly.
//!
//! Both LoRa PHYs count their airtime in symbols with quarter-symbol
//! offsets (4.25, 6.25). Counting in quarter symbols keeps the whole
//! computation in integers, so the conversion below is the only place a
//! division with rounding happens.

use super::validate::MAX_SPREADING_FACTOR;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Duration of one LoRa symbol, `2^SF / BW`.
///
/// Returns `None` for a zero bandwidth or a spreading factor above 12.
///
/// ```
/// use std::time::Duration;
/// use lorawan_toa::toa::symbol_duration;
///
/// assert_eq!(symbol_duration(7, 125_000), Some(Duration::from_micros(1024)));
/// assert_eq!(symbol_duration(7, 0), None);
/// ```
pub fn symbol_duration(spreading_factor: u32, bandwidth_hz: u32) -> Option<Duration> {
    if bandwidth_hz == 0 || spreading_factor > MAX_SPREADING_FACTOR {
        return None;
    }
    Some(from_quarter_symbols(4, spreading_factor, bandwidth_hz))
}

/// Convert a quarter-symbol count into a duration, rounded to the nearest
/// nanosecond.
///
/// Callers pass a validated spreading factor and a non-zero bandwidth.
pub(crate) fn from_quarter_symbols(
    quarter_symbols: u128,
    spreading_factor: u32,
    bandwidth_hz: u32,
) -> Duration {
    let numerator = quarter_symbols * (1u128 << spreading_factor) * NANOS_PER_SEC;
    let denominator = 4 * u128::from(bandwidth_hz);
    from_nanos((numerator + denominator / 2) / denominator)
}

/// Build a duration from a nanosecond count that may exceed `u64`.
pub(crate) fn from_nanos(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_duration_sf7_125khz() {
        // 2^7 / 125000 = 1.024 ms
        assert_eq!(symbol_duration(7, 125_000), Some(Duration::from_micros(1024)));
    }

    #[test]
    fn test_symbol_duration_sf12_125khz() {
        // 2^12 / 125000 = 32.768 ms
        assert_eq!(
            symbol_duration(12, 125_000),
            Some(Duration::from_micros(32_768))
        );
    }

    #[test]
    fn test_symbol_duration_sf7_500khz() {
        assert_eq!(symbol_duration(7, 500_000), Some(Duration::from_micros(256)));
    }

    #[test]
    fn test_symbol_duration_rounds_to_nanos() {
        // 2^7 / 812000 = 157635.467... ns
        assert_eq!(
            symbol_duration(7, 812_000),
            Some(Duration::from_nanos(157_635))
        );
    }

    #[test]
    fn test_symbol_duration_rejects_bad_input() {
        assert_eq!(symbol_duration(7, 0), None);
        assert_eq!(symbol_duration(13, 125_000), None);
        assert_eq!(symbol_duration(u32::MAX, 125_000), None);
    }

    #[test]
    fn test_quarter_symbols() {
        // 12.25 symbols at SF7/125kHz
        assert_eq!(
            from_quarter_symbols(49, 7, 125_000),
            Duration::from_micros(12_544)
        );
    }

    #[test]
    fn test_from_nanos_splits_seconds() {
        assert_eq!(from_nanos(1_500_000_001), Duration::new(1, 500_000_001));
    }

    #[test]
    fn test_from_nanos_saturates() {
        assert_eq!(from_nanos(u128::MAX).as_secs(), u64::MAX);
    }
}
