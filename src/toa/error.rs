//! Errors returned by the time-on-air calculator.

use super::FrequencyBand;
use std::fmt;

/// Reasons a settings record cannot be turned into a duration.
///
/// Every variant names the parameter that was rejected. No variant carries a
/// partial duration: callers must treat any error as "duration unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToaError {
    /// Coding rate string is malformed or its denominator is not accepted by
    /// the active PHY.
    InvalidCodingRate(String),
    /// Spreading factor is outside the range of the active PHY.
    InvalidSpreadingFactor {
        spreading_factor: u32,
        band: FrequencyBand,
    },
    /// Bandwidth must be positive.
    InvalidBandwidth(u32),
    /// FSK bit rate must be positive.
    InvalidBitRate(u32),
    /// Settings record carries no modulation.
    UnsupportedModulation,
}

impl fmt::Display for ToaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCodingRate(cr) => write!(f, "invalid coding rate: {:?}", cr),
            Self::InvalidSpreadingFactor {
                spreading_factor,
                band,
            } => write!(
                f,
                "invalid spreading factor SF{} for band {}",
                spreading_factor, band
            ),
            Self::InvalidBandwidth(bw) => write!(f, "invalid bandwidth: {} Hz", bw),
            Self::InvalidBitRate(rate) => write!(f, "invalid bit rate: {} bit/s", rate),
            Self::UnsupportedModulation => write!(f, "unsupported modulation"),
        }
    }
}

impl std::error::Error for ToaError {}
