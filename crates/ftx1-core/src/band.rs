//! Band selector for the `BS` (band select) command.
//!
//! The FTX-1 numbers its band stack from 0 (160 m) to 14 (70 cm), with the
//! 70 MHz general-coverage segment and the AIR band slotted in between. The
//! index is sent as two zero-padded digits.
//!
//! # Example
//!
//! ```
//! use ftx1_core::Band;
//!
//! let band = Band::from_freq(14_074_000).unwrap();
//! assert_eq!(band, Band::Band20m);
//! assert_eq!(band.index(), 5);
//! assert_eq!(band.to_string(), "20m");
//! ```

use std::fmt;
use std::str::FromStr;

/// One entry of the FTX-1 band stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// 160 meters (1.8-2.0 MHz).
    Band160m,
    /// 80 meters (3.5-4.0 MHz).
    Band80m,
    /// 60 meters / 5 MHz channels.
    Band60m,
    /// 40 meters (7.0-7.3 MHz).
    Band40m,
    /// 30 meters (10.1-10.15 MHz).
    Band30m,
    /// 20 meters (14.0-14.35 MHz).
    Band20m,
    /// 17 meters (18.068-18.168 MHz).
    Band17m,
    /// 15 meters (21.0-21.45 MHz).
    Band15m,
    /// 12 meters (24.89-24.99 MHz).
    Band12m,
    /// 10 meters (28.0-29.7 MHz).
    Band10m,
    /// 6 meters (50-54 MHz).
    Band6m,
    /// 70 MHz general-coverage segment.
    Gen70MHz,
    /// VHF airband (118-137 MHz), receive only.
    Air,
    /// 2 meters (144-148 MHz).
    Band2m,
    /// 70 centimeters (420-450 MHz).
    Band70cm,
}

/// All bands in band-stack order, which is also frequency order.
const ALL_BANDS: &[Band] = &[
    Band::Band160m,
    Band::Band80m,
    Band::Band60m,
    Band::Band40m,
    Band::Band30m,
    Band::Band20m,
    Band::Band17m,
    Band::Band15m,
    Band::Band12m,
    Band::Band10m,
    Band::Band6m,
    Band::Gen70MHz,
    Band::Air,
    Band::Band2m,
    Band::Band70cm,
];

/// An inclusive frequency range in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRange {
    pub low_hz: u32,
    pub high_hz: u32,
}

impl BandRange {
    pub const fn new(low_hz: u32, high_hz: u32) -> Self {
        BandRange { low_hz, high_hz }
    }

    pub fn contains(&self, freq_hz: u32) -> bool {
        freq_hz >= self.low_hz && freq_hz <= self.high_hz
    }
}

impl Band {
    /// Band-stack index as sent in the `BS` payload.
    pub fn index(self) -> u8 {
        match self {
            Band::Band160m => 0,
            Band::Band80m => 1,
            Band::Band60m => 2,
            Band::Band40m => 3,
            Band::Band30m => 4,
            Band::Band20m => 5,
            Band::Band17m => 6,
            Band::Band15m => 7,
            Band::Band12m => 8,
            Band::Band10m => 9,
            Band::Band6m => 10,
            Band::Gen70MHz => 11,
            Band::Air => 12,
            Band::Band2m => 13,
            Band::Band70cm => 14,
        }
    }

    pub fn from_index(index: u8) -> Option<Band> {
        ALL_BANDS.get(usize::from(index)).copied()
    }

    /// Returns the band containing the given frequency, if any.
    pub fn from_freq(freq_hz: u32) -> Option<Band> {
        ALL_BANDS
            .iter()
            .copied()
            .find(|band| band.freq_range().contains(freq_hz))
    }

    pub fn freq_range(self) -> BandRange {
        match self {
            Band::Band160m => BandRange::new(1_800_000, 2_000_000),
            Band::Band80m => BandRange::new(3_500_000, 4_000_000),
            Band::Band60m => BandRange::new(5_330_500, 5_406_500),
            Band::Band40m => BandRange::new(7_000_000, 7_300_000),
            Band::Band30m => BandRange::new(10_100_000, 10_150_000),
            Band::Band20m => BandRange::new(14_000_000, 14_350_000),
            Band::Band17m => BandRange::new(18_068_000, 18_168_000),
            Band::Band15m => BandRange::new(21_000_000, 21_450_000),
            Band::Band12m => BandRange::new(24_890_000, 24_990_000),
            Band::Band10m => BandRange::new(28_000_000, 29_700_000),
            Band::Band6m => BandRange::new(50_000_000, 54_000_000),
            Band::Gen70MHz => BandRange::new(70_000_000, 70_500_000),
            Band::Air => BandRange::new(118_000_000, 136_999_999),
            Band::Band2m => BandRange::new(144_000_000, 148_000_000),
            Band::Band70cm => BandRange::new(420_000_000, 450_000_000),
        }
    }

    /// Short display name (e.g. "20m", "AIR").
    pub fn as_str(self) -> &'static str {
        match self {
            Band::Band160m => "160m",
            Band::Band80m => "80m",
            Band::Band60m => "60m",
            Band::Band40m => "40m",
            Band::Band30m => "30m",
            Band::Band20m => "20m",
            Band::Band17m => "17m",
            Band::Band15m => "15m",
            Band::Band12m => "12m",
            Band::Band10m => "10m",
            Band::Band6m => "6m",
            Band::Gen70MHz => "70MHz",
            Band::Air => "AIR",
            Band::Band2m => "2m",
            Band::Band70cm => "70cm",
        }
    }

    pub fn all() -> &'static [Band] {
        ALL_BANDS
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed into a [`Band`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBandError(String);

impl fmt::Display for ParseBandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown band: '{}'", self.0)
    }
}

impl std::error::Error for ParseBandError {}

impl FromStr for Band {
    type Err = ParseBandError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "160m" | "160" => Ok(Band::Band160m),
            "80m" | "80" => Ok(Band::Band80m),
            "60m" | "60" | "5mhz" => Ok(Band::Band60m),
            "40m" | "40" => Ok(Band::Band40m),
            "30m" | "30" => Ok(Band::Band30m),
            "20m" | "20" => Ok(Band::Band20m),
            "17m" | "17" => Ok(Band::Band17m),
            "15m" | "15" => Ok(Band::Band15m),
            "12m" | "12" => Ok(Band::Band12m),
            "10m" | "10" => Ok(Band::Band10m),
            "6m" | "6" => Ok(Band::Band6m),
            "70mhz" | "gen" | "4m" => Ok(Band::Gen70MHz),
            "air" => Ok(Band::Air),
            "2m" | "2" => Ok(Band::Band2m),
            "70cm" | "70" => Ok(Band::Band70cm),
            _ => Err(ParseBandError(s.to_string())),
        }
    }
}
