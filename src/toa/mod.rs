//! Time-on-air calculation.
//!
//! Computes how long a radio transmission occupies the channel, given the
//! payload size and the transmission settings. This module contains:
//! - [`settings`]: Transmission settings records
//! - [`validate`]: Parameter validation and default resolution
//! - [`lora`]: Classic (sub-GHz) LoRa formula
//! - [`lora2400`]: 2.4 GHz LoRa formula
//! - [`fsk`]: FSK formula
//!
//! The calculator is pure and holds no shared state, so it can be called
//! from any number of threads at once.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use lorawan_toa::toa::{self, TxSettings};
//!
//! let settings = TxSettings::lora(868_100_000, 7, 125_000, "4/5");
//! let airtime = toa::compute(10, &settings).unwrap();
//! assert_eq!(airtime, Duration::from_micros(41_216));
//! ```

mod coding_rate;
mod error;
pub mod fsk;
pub mod lora;
pub mod lora2400;
pub mod settings;
mod symbol;
pub mod validate;

pub use coding_rate::{CodingRate, BAND_2400_DENOMINATORS, CLASSIC_DENOMINATORS};
pub use error::ToaError;
pub use settings::{FrequencyBand, FskDataRate, LoRaDataRate, Modulation, TxSettings};
pub use symbol::symbol_duration;
pub use validate::{validate, PhyParams};

use log::{debug, trace};
use std::time::Duration;

/// Compute the time on air of a `payload_size`-byte frame sent with
/// `settings`.
///
/// The settings are validated first; an invalid record yields an error and
/// no duration. The result is deterministic: identical inputs always give
/// identical durations.
pub fn compute(payload_size: usize, settings: &TxSettings) -> Result<Duration, ToaError> {
    let params = match validate(settings) {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejected tx settings {:?}: {}", settings, e);
            return Err(e);
        }
    };

    let airtime = match params {
        PhyParams::LoRa(p) => lora::time_on_air(payload_size, &p),
        PhyParams::LoRa2400(p) => lora2400::time_on_air(payload_size, &p),
        PhyParams::Fsk(p) => fsk::time_on_air(payload_size, &p),
    };

    trace!(
        "Time on air for {} bytes at {} Hz: {:?}",
        payload_size,
        settings.frequency,
        airtime
    );
    Ok(airtime)
}

/// Compute the time on air of `payload` sent with `settings`.
///
/// ```
/// use lorawan_toa::toa::{self, TxSettings};
///
/// let settings = TxSettings::fsk(868_300_000, 50_000);
/// let airtime = toa::compute_for_payload(&[0u8; 200], &settings).unwrap();
/// assert_eq!(airtime.as_micros(), 33_760);
/// ```
pub fn compute_for_payload(payload: &[u8], settings: &TxSettings) -> Result<Duration, ToaError> {
    compute(payload.len(), settings)
}
