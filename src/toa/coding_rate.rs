//! LoRa coding rate parsing.
//!
//! The coding rate travels as a `"4/D"` string. It is parsed once, checked
//! against the denominators the PHY family supports, and carried through the
//! formulas as a typed [`CodingRate`].

use super::{FrequencyBand, ToaError};

/// Numerator of every LoRa coding rate.
pub const CODING_RATE_NUMERATOR: u32 = 4;

/// Denominators accepted by the classic sub-GHz PHY.
pub const CLASSIC_DENOMINATORS: &[u32] = &[5, 6, 7, 8];

/// Denominators accepted by the 2.4 GHz PHY.
pub const BAND_2400_DENOMINATORS: &[u32] = &[5, 6, 8];

/// Validated forward error correction rate `4/D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodingRate {
    denominator: u32,
}

impl CodingRate {
    /// Parse `"N/D"` and check it against the denominators of `band`.
    pub fn parse(s: &str, band: FrequencyBand) -> Result<Self, ToaError> {
        let invalid = || ToaError::InvalidCodingRate(s.to_string());

        let (numerator, denominator) = s.split_once('/').ok_or_else(invalid)?;
        let numerator = parse_positive(numerator).ok_or_else(invalid)?;
        let denominator = parse_positive(denominator).ok_or_else(invalid)?;

        if numerator != CODING_RATE_NUMERATOR {
            return Err(invalid());
        }
        if !Self::denominators(band).contains(&denominator) {
            return Err(invalid());
        }
        Ok(Self { denominator })
    }

    /// Accepted denominators for a PHY family.
    pub fn denominators(band: FrequencyBand) -> &'static [u32] {
        match band {
            FrequencyBand::Classic => CLASSIC_DENOMINATORS,
            FrequencyBand::Band2400 => BAND_2400_DENOMINATORS,
        }
    }

    /// Coded bits per 4 data bits.
    pub fn denominator(self) -> u32 {
        self.denominator
    }
}

// Digits only: no sign, no whitespace.
fn parse_positive(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|&n| n > 0)
}
