//! Settings validation.
//!
//! Turns a [`TxSettings`] record into typed, checked parameters for exactly
//! one PHY formula, resolving unset flags to the PHY defaults on the way.
//! Nothing downstream of this module needs to re-check its inputs.

use super::fsk::{self, FskParams};
use super::lora::{self, LoRaParams};
use super::lora2400::{self, LoRa2400Params};
use super::{CodingRate, FrequencyBand, LoRaDataRate, Modulation, ToaError, TxSettings};
use std::ops::RangeInclusive;

/// Highest spreading factor of any LoRa PHY.
pub const MAX_SPREADING_FACTOR: u32 = 12;

/// Spreading factors of the classic sub-GHz PHY.
pub const CLASSIC_SPREADING_FACTORS: RangeInclusive<u32> = 7..=MAX_SPREADING_FACTOR;

/// Spreading factors of the 2.4 GHz PHY.
pub const BAND_2400_SPREADING_FACTORS: RangeInclusive<u32> = 5..=MAX_SPREADING_FACTOR;

/// Parameters for one of the time-on-air formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhyParams {
    LoRa(LoRaParams),
    LoRa2400(LoRa2400Params),
    Fsk(FskParams),
}

/// Validate `settings` and resolve its defaults.
pub fn validate(settings: &TxSettings) -> Result<PhyParams, ToaError> {
    match settings.modulation {
        None => Err(ToaError::UnsupportedModulation),
        Some(Modulation::LoRa(dr)) => match dr.band {
            FrequencyBand::Classic => validate_lora(&dr, settings).map(PhyParams::LoRa),
            FrequencyBand::Band2400 => {
                validate_lora_2400(&dr, settings).map(PhyParams::LoRa2400)
            }
        },
        Some(Modulation::Fsk(dr)) => {
            if dr.bit_rate == 0 {
                return Err(ToaError::InvalidBitRate(dr.bit_rate));
            }
            Ok(PhyParams::Fsk(FskParams {
                bit_rate: dr.bit_rate,
                preamble_bytes: settings
                    .preamble_length
                    .unwrap_or(fsk::DEFAULT_PREAMBLE_BYTES),
                crc_enabled: settings.enable_crc.unwrap_or(fsk::DEFAULT_CRC_ENABLED),
            }))
        }
    }
}

/// Checks shared by both LoRa PHYs: spreading factor, bandwidth, coding rate.
fn check_lora_data_rate(
    dr: &LoRaDataRate,
    spreading_factors: &RangeInclusive<u32>,
    coding_rate: &str,
) -> Result<CodingRate, ToaError> {
    if !spreading_factors.contains(&dr.spreading_factor) {
        return Err(ToaError::InvalidSpreadingFactor {
            spreading_factor: dr.spreading_factor,
            band: dr.band,
        });
    }
    if dr.bandwidth == 0 {
        return Err(ToaError::InvalidBandwidth(dr.bandwidth));
    }
    CodingRate::parse(coding_rate, dr.band)
}

fn validate_lora(dr: &LoRaDataRate, settings: &TxSettings) -> Result<LoRaParams, ToaError> {
    let coding_rate = check_lora_data_rate(dr, &CLASSIC_SPREADING_FACTORS, &settings.coding_rate)?;
    Ok(LoRaParams {
        spreading_factor: dr.spreading_factor,
        bandwidth_hz: dr.bandwidth,
        coding_rate,
        preamble_symbols: settings
            .preamble_length
            .unwrap_or(lora::DEFAULT_PREAMBLE_SYMBOLS),
        explicit_header: !settings.implicit_header.unwrap_or(false),
        crc_enabled: settings.enable_crc.unwrap_or(lora::DEFAULT_CRC_ENABLED),
        low_data_rate_optimize: settings
            .low_data_rate_optimization
            .unwrap_or_else(|| lora::low_data_rate_required(dr.spreading_factor, dr.bandwidth)),
    })
}

fn validate_lora_2400(
    dr: &LoRaDataRate,
    settings: &TxSettings,
) -> Result<LoRa2400Params, ToaError> {
    let coding_rate =
        check_lora_data_rate(dr, &BAND_2400_SPREADING_FACTORS, &settings.coding_rate)?;
    Ok(LoRa2400Params {
        spreading_factor: dr.spreading_factor,
        bandwidth_hz: dr.bandwidth,
        coding_rate,
        preamble_symbols: settings
            .preamble_length
            .unwrap_or(lora2400::DEFAULT_PREAMBLE_SYMBOLS),
        explicit_header: !settings.implicit_header.unwrap_or(false),
        crc_enabled: settings
            .enable_crc
            .unwrap_or(lora2400::DEFAULT_CRC_ENABLED),
        low_data_rate_optimize: settings
            .low_data_rate_optimization
            .unwrap_or_else(|| lora2400::low_data_rate_required(dr.spreading_factor)),
    })
}
