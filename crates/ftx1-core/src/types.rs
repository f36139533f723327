//! Enumerated radio settings and their CAT wire codes.
//!
//! Each enum knows its own numeric code as the FTX-1 encodes it on the
//! wire (`code()` / `from_code()`), a short display name for UIs and logs
//! (`as_str()` / `Display`), and a case-insensitive `FromStr` for front ends.

use std::fmt;
use std::str::FromStr;

/// Error returned when a string cannot be parsed into one of the enums here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValueError {
    kind: &'static str,
    input: String,
}

impl ParseValueError {
    fn new(kind: &'static str, input: &str) -> Self {
        ParseValueError {
            kind,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.input)
    }
}

impl std::error::Error for ParseValueError {}

/// Which of the two receivers a command addresses.
///
/// Encoded as a single digit in most payloads: `0` = MAIN, `1` = SUB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vfo {
    /// Main-side VFO (VFO-A).
    #[default]
    Main,
    /// Sub-side VFO (VFO-B).
    Sub,
}

impl Vfo {
    /// Wire digit for this VFO.
    pub fn code(self) -> u8 {
        match self {
            Vfo::Main => 0,
            Vfo::Sub => 1,
        }
    }

    /// Decode a wire digit. Anything other than 0 or 1 is `None`.
    pub fn from_code(code: u8) -> Option<Vfo> {
        match code {
            0 => Some(Vfo::Main),
            1 => Some(Vfo::Sub),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vfo::Main => "MAIN",
            Vfo::Sub => "SUB",
        }
    }
}

impl fmt::Display for Vfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vfo {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MAIN" | "A" | "0" => Ok(Vfo::Main),
            "SUB" | "B" | "1" => Ok(Vfo::Sub),
            _ => Err(ParseValueError::new("VFO", s)),
        }
    }
}

/// Operating mode, numbered the way the FTX-1 numbers it.
///
/// Codes start at 1 and are sent as two zero-padded digits (`MD0` + `03`
/// selects CW on MAIN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingMode {
    Lsb,
    Usb,
    Cw,
    Fm,
    Am,
    /// RTTY, lower sideband.
    RttyLsb,
    /// CW reverse.
    CwR,
    DataLsb,
    /// RTTY, upper sideband.
    RttyUsb,
    DataFm,
    /// Narrow FM.
    FmN,
    DataUsb,
    /// Narrow AM.
    AmN,
    /// C4FM digital voice.
    C4fm,
}

const ALL_MODES: &[OperatingMode] = &[
    OperatingMode::Lsb,
    OperatingMode::Usb,
    OperatingMode::Cw,
    OperatingMode::Fm,
    OperatingMode::Am,
    OperatingMode::RttyLsb,
    OperatingMode::CwR,
    OperatingMode::DataLsb,
    OperatingMode::RttyUsb,
    OperatingMode::DataFm,
    OperatingMode::FmN,
    OperatingMode::DataUsb,
    OperatingMode::AmN,
    OperatingMode::C4fm,
];

impl OperatingMode {
    /// Wire code (1-14).
    pub fn code(self) -> u8 {
        match self {
            OperatingMode::Lsb => 1,
            OperatingMode::Usb => 2,
            OperatingMode::Cw => 3,
            OperatingMode::Fm => 4,
            OperatingMode::Am => 5,
            OperatingMode::RttyLsb => 6,
            OperatingMode::CwR => 7,
            OperatingMode::DataLsb => 8,
            OperatingMode::RttyUsb => 9,
            OperatingMode::DataFm => 10,
            OperatingMode::FmN => 11,
            OperatingMode::DataUsb => 12,
            OperatingMode::AmN => 13,
            OperatingMode::C4fm => 14,
        }
    }

    pub fn from_code(code: u8) -> Option<OperatingMode> {
        ALL_MODES.iter().copied().find(|m| m.code() == code)
    }

    pub fn all() -> &'static [OperatingMode] {
        ALL_MODES
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperatingMode::Lsb => "LSB",
            OperatingMode::Usb => "USB",
            OperatingMode::Cw => "CW",
            OperatingMode::Fm => "FM",
            OperatingMode::Am => "AM",
            OperatingMode::RttyLsb => "RTTY-LSB",
            OperatingMode::CwR => "CW-R",
            OperatingMode::DataLsb => "DATA-LSB",
            OperatingMode::RttyUsb => "RTTY-USB",
            OperatingMode::DataFm => "DATA-FM",
            OperatingMode::FmN => "FM-N",
            OperatingMode::DataUsb => "DATA-USB",
            OperatingMode::AmN => "AM-N",
            OperatingMode::C4fm => "C4FM",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.to_uppercase().replace('_', "-");
        ALL_MODES
            .iter()
            .copied()
            .find(|m| m.as_str() == normalized || m.as_str().replace('-', "") == normalized)
            .ok_or_else(|| ParseValueError::new("mode", s))
    }
}

/// AGC time constant as accepted by the `GT` set command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgcType {
    Auto,
    Fast,
    Mid,
    Slow,
    Off,
}

impl AgcType {
    /// Wire code (0-4).
    pub fn code(self) -> u8 {
        match self {
            AgcType::Auto => 0,
            AgcType::Fast => 1,
            AgcType::Mid => 2,
            AgcType::Slow => 3,
            AgcType::Off => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<AgcType> {
        match code {
            0 => Some(AgcType::Auto),
            1 => Some(AgcType::Fast),
            2 => Some(AgcType::Mid),
            3 => Some(AgcType::Slow),
            4 => Some(AgcType::Off),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgcType::Auto => "AUTO",
            AgcType::Fast => "FAST",
            AgcType::Mid => "MID",
            AgcType::Slow => "SLOW",
            AgcType::Off => "OFF",
        }
    }
}

impl fmt::Display for AgcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgcType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AUTO" => Ok(AgcType::Auto),
            "FAST" => Ok(AgcType::Fast),
            "MID" | "MED" | "MEDIUM" => Ok(AgcType::Mid),
            "SLOW" => Ok(AgcType::Slow),
            "OFF" => Ok(AgcType::Off),
            _ => Err(ParseValueError::new("AGC type", s)),
        }
    }
}

/// Sub-audible squelch system selected by the `CN` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneType {
    /// Continuous tone (CTCSS).
    Ctcss,
    /// Digital code (DCS).
    Dcs,
}

impl ToneType {
    pub fn code(self) -> u8 {
        match self {
            ToneType::Ctcss => 0,
            ToneType::Dcs => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<ToneType> {
        match code {
            0 => Some(ToneType::Ctcss),
            1 => Some(ToneType::Dcs),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToneType::Ctcss => "CTCSS",
            ToneType::Dcs => "DCS",
        }
    }
}

impl fmt::Display for ToneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToneType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CTCSS" | "0" => Ok(ToneType::Ctcss),
            "DCS" | "1" => Ok(ToneType::Dcs),
            _ => Err(ParseValueError::new("tone type", s)),
        }
    }
}
