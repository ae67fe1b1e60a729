//! Transmission settings records.
//!
//! A [`TxSettings`] is what a scheduler or gateway bridge hands to the
//! calculator: the carrier frequency, the data rate (modulation and its
//! parameters), the coding rate as it appears on the wire, and the optional
//! PHY flags. Flags left as `None` take the defaults of the selected PHY.
//!
//! # Example
//!
//! ```
//! use lorawan_toa::toa::{FrequencyBand, Modulation, TxSettings};
//!
//! let settings = TxSettings::lora(2_422_000_000, 7, 812_000, "4/5");
//! match settings.modulation {
//!     Some(Modulation::LoRa(dr)) => assert_eq!(dr.band, FrequencyBand::Band2400),
//!     _ => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier frequencies from here upwards are served by the 2.4 GHz LoRa PHY.
pub const BAND_2400_MIN_FREQUENCY_HZ: u64 = 2_400_000_000;

/// LoRa PHY family.
///
/// The two families are standardized independently and use different
/// symbol-count formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyBand {
    /// Sub-GHz ISM bands (EU868, US915, AS923, ...).
    #[default]
    Classic,
    /// 2.4 GHz ISM band.
    Band2400,
}

impl FrequencyBand {
    /// Select the PHY family serving a carrier frequency in Hz.
    pub fn from_frequency(frequency_hz: u64) -> Self {
        if frequency_hz >= BAND_2400_MIN_FREQUENCY_HZ {
            Self::Band2400
        } else {
            Self::Classic
        }
    }

    /// Name as written in settings records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Band2400 => "band2400",
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LoRa data rate.
///
/// Deserialized through the settings record only, so that a missing `band`
/// follows the carrier frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoRaDataRate {
    /// Spreading factor (7-12 classic, 5-12 at 2.4 GHz).
    pub spreading_factor: u32,
    /// Bandwidth in Hz.
    pub bandwidth: u32,
    /// PHY family the data rate belongs to.
    pub band: FrequencyBand,
}

impl LoRaDataRate {
    pub fn new(spreading_factor: u32, bandwidth: u32, band: FrequencyBand) -> Self {
        Self {
            spreading_factor,
            bandwidth,
            band,
        }
    }
}

/// FSK data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FskDataRate {
    /// Bit rate in bits per second.
    pub bit_rate: u32,
}

/// Modulation of a transmission. Exactly one variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Modulation {
    #[serde(rename = "lora")]
    LoRa(LoRaDataRate),
    #[serde(rename = "fsk")]
    Fsk(FskDataRate),
}

/// Settings of a single transmission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "TxSettingsRecord")]
pub struct TxSettings {
    /// Carrier frequency in Hz. Not used by the timing formulas.
    pub frequency: u64,
    /// Data rate. `None` is rejected as an unsupported modulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulation: Option<Modulation>,
    /// LoRa coding rate as `"4/D"`. Ignored for FSK.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub coding_rate: String,
    /// PHY CRC. Defaults per PHY when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_crc: Option<bool>,
    /// Implicit (headerless) LoRa mode. Defaults to explicit header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_header: Option<bool>,
    /// LoRa low data rate optimization. Derived from the data rate when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_data_rate_optimization: Option<bool>,
    /// Preamble length: symbols for LoRa, bytes for FSK.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble_length: Option<u32>,
}

impl TxSettings {
    /// LoRa settings; the PHY family is derived from `frequency`.
    pub fn lora(
        frequency: u64,
        spreading_factor: u32,
        bandwidth: u32,
        coding_rate: impl Into<String>,
    ) -> Self {
        let band = FrequencyBand::from_frequency(frequency);
        Self {
            frequency,
            modulation: Some(Modulation::LoRa(LoRaDataRate::new(
                spreading_factor,
                bandwidth,
                band,
            ))),
            coding_rate: coding_rate.into(),
            ..Default::default()
        }
    }

    /// FSK settings.
    pub fn fsk(frequency: u64, bit_rate: u32) -> Self {
        Self {
            frequency,
            modulation: Some(Modulation::Fsk(FskDataRate { bit_rate })),
            ..Default::default()
        }
    }
}

// Wire shape of a settings record. `band` may be left out of a LoRa data
// rate, in which case it follows from the frequency.
#[derive(Deserialize)]
struct TxSettingsRecord {
    #[serde(default)]
    frequency: u64,
    #[serde(default)]
    modulation: Option<ModulationRecord>,
    #[serde(default)]
    coding_rate: String,
    #[serde(default)]
    enable_crc: Option<bool>,
    #[serde(default)]
    implicit_header: Option<bool>,
    #[serde(default)]
    low_data_rate_optimization: Option<bool>,
    #[serde(default)]
    preamble_length: Option<u32>,
}

#[derive(Deserialize)]
enum ModulationRecord {
    #[serde(rename = "lora")]
    LoRa {
        spreading_factor: u32,
        bandwidth: u32,
        #[serde(default)]
        band: Option<FrequencyBand>,
    },
    #[serde(rename = "fsk")]
    Fsk(FskDataRate),
}

impl From<TxSettingsRecord> for TxSettings {
    fn from(record: TxSettingsRecord) -> Self {
        let frequency = record.frequency;
        let modulation = record.modulation.map(|m| match m {
            ModulationRecord::LoRa {
                spreading_factor,
                bandwidth,
                band,
            } => Modulation::LoRa(LoRaDataRate::new(
                spreading_factor,
                bandwidth,
                band.unwrap_or_else(|| FrequencyBand::from_frequency(frequency)),
            )),
            ModulationRecord::Fsk(dr) => Modulation::Fsk(dr),
        });
        Self {
            frequency,
            modulation,
            coding_rate: record.coding_rate,
            enable_crc: record.enable_crc,
            implicit_header: record.implicit_header,
            low_data_rate_optimization: record.low_data_rate_optimization,
            preamble_length: record.preamble_length,
        }
    }
}
