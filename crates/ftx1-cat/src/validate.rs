//! Range checks and reply sanity helpers.
//!
//! The builders call the `check_*` functions before formatting anything;
//! the parsers re-apply the same bounds to decoded fields.

use ftx1_core::{Band, Error, Result};

use crate::token::Opcode;

/// Largest frequency that fits the 9-digit field, in hertz.
pub const MAX_FREQUENCY_HZ: u32 = 999_999_999;

/// Transmit power bounds in watts.
pub const MIN_POWER_W: u8 = 5;
pub const MAX_POWER_W: u8 = 100;

/// Largest CTCSS/DCS table index.
pub const MAX_TONE_CODE: u8 = 99;

pub fn check_frequency(hz: u32) -> Result<()> {
    if hz > MAX_FREQUENCY_HZ {
        return Err(Error::InvalidParameter(format!(
            "frequency {hz} Hz exceeds {MAX_FREQUENCY_HZ} Hz"
        )));
    }
    Ok(())
}

/// Gain and squelch levels span the whole `u8` domain, so every value passes.
pub fn check_level(_level: u8) -> Result<()> {
    Ok(())
}

pub fn check_power(watts: u8) -> Result<()> {
    if !(MIN_POWER_W..=MAX_POWER_W).contains(&watts) {
        return Err(Error::InvalidParameter(format!(
            "power {watts} W outside {MIN_POWER_W}..={MAX_POWER_W}"
        )));
    }
    Ok(())
}

pub fn check_tone_code(code: u8) -> Result<()> {
    if code > MAX_TONE_CODE {
        return Err(Error::InvalidParameter(format!(
            "tone code {code} outside 0..={MAX_TONE_CODE}"
        )));
    }
    Ok(())
}

/// Check that a frequency fits the wire field and suggest its band.
///
/// Returns `Ok(None)` for a representable frequency outside every band
/// the rig's band stack knows about.
pub fn validate_frequency(hz: u32) -> Result<Option<Band>> {
    check_frequency(hz)?;
    Ok(Band::from_freq(hz))
}

/// Cheap plausibility test for a reply: at least two characters, the first
/// two of them ASCII letters.
pub fn is_valid_response(reply: &str) -> bool {
    let bytes = reply.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_alphabetic()
}

/// Number of bytes in the reply to a read of `opcode`, terminator included.
///
/// `None` for replies of variable length (free text) and for opcodes that
/// are never answered.
pub fn expected_response_length(opcode: Opcode) -> Option<usize> {
    match opcode.as_str() {
        "FA" | "FB" => Some(12),
        "MD" => Some(6),
        "AG" | "RG" | "SQ" => Some(7),
        "PC" => Some(6),
        "GT" => Some(5),
        "ST" | "AI" => Some(4),
        "CN" => Some(7),
        _ => None,
    }
}
