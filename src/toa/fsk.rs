//! FSK time-on-air.
//!
//! An FSK frame is a plain bit stream:
//! PREAMBLE + SYNC_WORD + LENGTH + PAYLOAD + CRC, sent at the bit rate.

use super::symbol;
use std::time::Duration;

/// Preamble length in bytes when the settings do not override it.
pub const DEFAULT_PREAMBLE_BYTES: u32 = 5;

/// Sync word length in bytes.
pub const SYNC_WORD_BYTES: u32 = 3;

/// Length field in variable-length mode.
pub const LENGTH_FIELD_BYTES: u32 = 1;

/// CRC length when enabled.
pub const CRC_BYTES: u32 = 2;

/// PHY CRC state when the settings leave it unset.
pub const DEFAULT_CRC_ENABLED: bool = true;

/// Validated FSK parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FskParams {
    /// Bit rate in bits per second
    pub bit_rate: u32,
    pub preamble_bytes: u32,
    pub crc_enabled: bool,
}

impl FskParams {
    /// Total bits on air for a frame carrying `payload_size` bytes.
    pub fn frame_bits(&self, payload_size: usize) -> u128 {
        let crc = if self.crc_enabled { CRC_BYTES } else { 0 };
        let framing = self.preamble_bytes + SYNC_WORD_BYTES + LENGTH_FIELD_BYTES + crc;
        8 * (u128::from(framing) + payload_size as u128)
    }
}

/// Time on air of an FSK frame carrying `payload_size` bytes.
pub fn time_on_air(payload_size: usize, params: &FskParams) -> Duration {
    let bits = params.frame_bits(payload_size);
    let rate = u128::from(params.bit_rate);
    symbol::from_nanos((bits * 1_000_000_000 + rate / 2) / rate)
}
