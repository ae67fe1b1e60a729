//! Classic (sub-GHz) LoRa time-on-air.
//!
//! Uses the symbol-count formula of the Semtech SX127x/SX126x datasheets:
//!
//! ```text
//! Tsym          = 2^SF / BW
//! Tpreamble     = (Npreamble + 4.25) * Tsym
//! payloadSymbNb = 8 + max(ceil((8PL - 4SF + 28 + 16CRC - 20H) / (4(SF - 2DE))) * CR, 0)
//! ToA           = Tpreamble + payloadSymbNb * Tsym
//! ```
//!
//! where CR is the coding rate denominator (5-8).

use super::symbol;
use super::CodingRate;
use std::time::Duration;

/// Preamble length in symbols when the settings do not override it.
pub const DEFAULT_PREAMBLE_SYMBOLS: u32 = 8;

/// PHY CRC state when the settings leave it unset.
pub const DEFAULT_CRC_ENABLED: bool = true;

/// Symbol duration above which low data rate optimization is required.
pub const LOW_DATA_RATE_SYMBOL_THRESHOLD_MS: u64 = 16;

// 4.25 sync symbols after the preamble.
const SYNC_QUARTER_SYMBOLS: u128 = 17;

/// Validated classic LoRa modulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoRaParams {
    /// Spreading factor (7-12)
    pub spreading_factor: u32,
    /// Bandwidth in Hz
    pub bandwidth_hz: u32,
    pub coding_rate: CodingRate,
    /// Preamble length in symbols
    pub preamble_symbols: u32,
    /// Whether explicit header mode is used
    pub explicit_header: bool,
    /// Whether CRC is enabled
    pub crc_enabled: bool,
    /// Whether low data rate optimization (DE) is enabled
    pub low_data_rate_optimize: bool,
}

impl LoRaParams {
    /// Number of payload symbols, including the 8 fixed symbols.
    pub fn payload_symbols(&self, payload_size: usize) -> u128 {
        let sf = i128::from(self.spreading_factor);
        let de = i128::from(self.low_data_rate_optimize);
        let crc = if self.crc_enabled { 16 } else { 0 };
        let h = if self.explicit_header { 0 } else { 20 };

        let numerator = 8 * payload_size as i128 - 4 * sf + 28 + crc - h;
        let denominator = 4 * (sf - 2 * de);

        // max(ceil(n / d) * CR, 0)
        let blocks = if numerator > 0 {
            ((numerator + denominator - 1) / denominator) as u128
        } else {
            0
        };
        8 + blocks * u128::from(self.coding_rate.denominator())
    }

    fn quarter_symbols(&self, payload_size: usize) -> u128 {
        // (Npreamble + 4.25) + payloadSymbNb, in quarter symbols
        4 * u128::from(self.preamble_symbols)
            + SYNC_QUARTER_SYMBOLS
            + 4 * self.payload_symbols(payload_size)
    }
}

/// Whether a data rate needs low data rate optimization, i.e. its symbol
/// duration exceeds 16 ms (SF11 and SF12 at 125 kHz, SF12 at 250 kHz).
pub fn low_data_rate_required(spreading_factor: u32, bandwidth_hz: u32) -> bool {
    // 2^SF / BW > 16 / 1000
    let chips = 1u128.checked_shl(spreading_factor).unwrap_or(u128::MAX);
    chips.saturating_mul(1000)
        > u128::from(LOW_DATA_RATE_SYMBOL_THRESHOLD_MS) * u128::from(bandwidth_hz)
}

/// Time on air of a classic LoRa frame carrying `payload_size` bytes.
pub fn time_on_air(payload_size: usize, params: &LoRaParams) -> Duration {
    symbol::from_quarter_symbols(
        params.quarter_symbols(payload_size),
        params.spreading_factor,
        params.bandwidth_hz,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toa::FrequencyBand;

    fn params(sf: u32, bw: u32, cr: &str) -> LoRaParams {
        LoRaParams {
            spreading_factor: sf,
            bandwidth_hz: bw,
            coding_rate: CodingRate::parse(cr, FrequencyBand::Classic).unwrap(),
            preamble_symbols: DEFAULT_PREAMBLE_SYMBOLS,
            explicit_header: true,
            crc_enabled: DEFAULT_CRC_ENABLED,
            low_data_rate_optimize: low_data_rate_required(sf, bw),
        }
    }

    #[test]
    fn test_low_data_rate_required() {
        // SF7 at 125kHz: symbol time = 1.024ms
        assert!(!low_data_rate_required(7, 125_000));
        // SF10 at 125kHz: 8.192ms
        assert!(!low_data_rate_required(10, 125_000));
        // SF11 at 125kHz: 16.384ms
        assert!(low_data_rate_required(11, 125_000));
        assert!(low_data_rate_required(12, 125_000));
        // SF12 at 250kHz: 16.384ms
        assert!(low_data_rate_required(12, 250_000));
        // SF11 at 250kHz: 8.192ms
        assert!(!low_data_rate_required(11, 250_000));
        // SF12 at 500kHz: 8.192ms
        assert!(!low_data_rate_required(12, 500_000));
    }

    #[test]
    fn test_payload_symbols_sf7() {
        // ceil((80 - 28 + 28 + 16) / 28) = 4 blocks of 5 symbols
        assert_eq!(params(7, 125_000, "4/5").payload_symbols(10), 28);
    }

    #[test]
    fn test_payload_symbols_sf12_uses_ldro() {
        // ceil((80 - 48 + 44) / 40) = 2 blocks
        assert_eq!(params(12, 125_000, "4/5").payload_symbols(10), 18);
    }

    #[test]
    fn test_payload_symbols_never_below_eight() {
        let p = LoRaParams {
            explicit_header: false,
            crc_enabled: false,
            ..params(12, 125_000, "4/8")
        };
        // 0 - 48 + 28 < 0: only the fixed symbols remain
        assert_eq!(p.payload_symbols(0), 8);
    }

    #[test]
    fn test_time_on_air_sf7_125khz() {
        assert_eq!(
            time_on_air(10, &params(7, 125_000, "4/5")),
            Duration::from_micros(41_216)
        );
    }

    #[test]
    fn test_time_on_air_sf11_125khz() {
        assert_eq!(
            time_on_air(10, &params(11, 125_000, "4/5")),
            Duration::from_micros(577_536)
        );
    }

    #[test]
    fn test_explicit_ldro_flag_is_honoured() {
        let auto = params(12, 125_000, "4/5");
        let off = LoRaParams {
            low_data_rate_optimize: false,
            ..auto
        };
        // ceil(76 / 48) = 2 blocks either way at 10 bytes, so use 40 bytes:
        // with DE: ceil(316 / 40) = 8; without: ceil(316 / 48) = 7
        assert_eq!(auto.payload_symbols(40), 48);
        assert_eq!(off.payload_symbols(40), 43);
        assert!(time_on_air(40, &off) < time_on_air(40, &auto));
    }

    #[test]
    fn test_crc_and_header_flags() {
        let base = params(7, 125_000, "4/5");
        let no_crc = LoRaParams {
            crc_enabled: false,
            ..base
        };
        let implicit = LoRaParams {
            explicit_header: false,
            ..base
        };
        // 80 / 28 -> 3 blocks
        assert_eq!(no_crc.payload_symbols(10), 23);
        // 76 / 28 -> 3 blocks
        assert_eq!(implicit.payload_symbols(10), 23);
    }

    #[test]
    fn test_preamble_override() {
        let long = LoRaParams {
            preamble_symbols: 16,
            ..params(7, 125_000, "4/5")
        };
        // 8 extra symbols of 1.024ms
        assert_eq!(
            time_on_air(10, &long),
            Duration::from_micros(41_216 + 8 * 1024)
        );
    }

    #[test]
    fn test_empty_payload_has_airtime() {
        let airtime = time_on_air(0, &params(7, 125_000, "4/5"));
        // 12.25 preamble symbols + 8 + 5
        assert_eq!(airtime, Duration::from_micros(25_856));
    }
}
