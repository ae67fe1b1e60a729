//! LoRa 2.4 GHz time-on-air.
//!
//! The SX128x PHY frames differently from the sub-GHz radios:
//!
//! - the preamble is followed by 4.25 sync symbols (6.25 for SF5 and SF6),
//! - in explicit-header mode an 8-symbol header block follows, and at SF9
//!   and above that block has spare room that carries the first payload
//!   bits (`8 * floor((SF - 7) / 2)` bits),
//! - the remaining payload (and CRC) bits are coded and spread over the
//!   following symbols as a single interleaved block:
//!
//! ```text
//! payloadSymb = ceil(max(8PL + 16CRC - Nheader_space, 0) * CR / (4 * SFeff))
//! ```
//!
//! with `SFeff = SF - 2` when low data rate optimization is active.
//!
//! Only validation and the final duration conversion are shared with
//! [`super::lora`].

use super::symbol;
use super::CodingRate;
use std::time::Duration;

/// Preamble length in symbols when the settings do not override it.
pub const DEFAULT_PREAMBLE_SYMBOLS: u32 = 8;

/// PHY CRC state when the settings leave it unset.
pub const DEFAULT_CRC_ENABLED: bool = false;

/// Lowest spreading factor that uses low data rate optimization by default.
pub const LOW_DATA_RATE_MIN_SPREADING_FACTOR: u32 = 11;

/// Symbols in an explicit header block.
pub const HEADER_SYMBOLS: u32 = 8;

// Sync overhead after the preamble, in quarter symbols.
const SYNC_QUARTER_SYMBOLS: u128 = 17;
const SYNC_QUARTER_SYMBOLS_FINE: u128 = 25;

/// Validated 2.4 GHz LoRa modulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoRa2400Params {
    /// Spreading factor (5-12)
    pub spreading_factor: u32,
    /// Bandwidth in Hz
    pub bandwidth_hz: u32,
    pub coding_rate: CodingRate,
    /// Preamble length in symbols
    pub preamble_symbols: u32,
    pub explicit_header: bool,
    pub crc_enabled: bool,
    pub low_data_rate_optimize: bool,
}

impl LoRa2400Params {
    /// Payload bits carried inside the explicit header block.
    pub fn header_payload_bits(&self) -> u32 {
        if !self.explicit_header || self.spreading_factor < 7 {
            return 0;
        }
        8 * ((self.spreading_factor - 7) / 2)
    }

    /// Symbols after the header block.
    pub fn payload_symbols(&self, payload_size: usize) -> u128 {
        let crc = if self.crc_enabled { 16 } else { 0 };
        let bits = (8 * payload_size as u128 + crc)
            .saturating_sub(u128::from(self.header_payload_bits()));

        let bits_per_symbol = if self.low_data_rate_optimize {
            self.spreading_factor - 2
        } else {
            self.spreading_factor
        };
        let numerator = bits * u128::from(self.coding_rate.denominator());
        let denominator = 4 * u128::from(bits_per_symbol);
        numerator.div_ceil(denominator)
    }

    /// Preamble, sync and header symbols, in quarter symbols.
    fn overhead_quarter_symbols(&self) -> u128 {
        let sync = if self.spreading_factor < 7 {
            SYNC_QUARTER_SYMBOLS_FINE
        } else {
            SYNC_QUARTER_SYMBOLS
        };
        let header = if self.explicit_header {
            4 * u128::from(HEADER_SYMBOLS)
        } else {
            0
        };
        4 * u128::from(self.preamble_symbols) + sync + header
    }
}

/// Whether low data rate optimization applies by default.
pub fn low_data_rate_required(spreading_factor: u32) -> bool {
    spreading_factor >= LOW_DATA_RATE_MIN_SPREADING_FACTOR
}

/// Time on air of a 2.4 GHz LoRa frame carrying `payload_size` bytes.
pub fn time_on_air(payload_size: usize, params: &LoRa2400Params) -> Duration {
    let quarters =
        params.overhead_quarter_symbols() + 4 * params.payload_symbols(payload_size);
    symbol::from_quarter_symbols(quarters, params.spreading_factor, params.bandwidth_hz)
}
