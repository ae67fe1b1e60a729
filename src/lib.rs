//! LoRaWAN time-on-air library.
//!
//! Computes how long a LoRa or FSK transmission occupies the radio channel.
//! Schedulers, duty-cycle enforcement and gateway bridges build on this to
//! decide whether and when a frame may be sent; the library itself only
//! answers how long it takes.

pub mod batch;
pub mod cli;
pub mod config;
pub mod toa;

// Re-export commonly used items
pub use config::{Config, ConfigError, OutputFormat};
pub use toa::{compute, compute_for_payload, FrequencyBand, Modulation, ToaError, TxSettings};
