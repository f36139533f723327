//! Typed operations and the records decoded from rig replies.
//!
//! Every readable setting is a [`Query`] variant, and the value the rig
//! returns for it is the matching [`Answer`] variant. Commands the rig never
//! answers (band stepping, VFO copy) are [`Action`]s.

use std::fmt;

use ftx1_core::{AgcType, Band, OperatingMode, ToneType, Vfo};

/// Capacity of the text returned by `VE` and `RI`.
pub const TEXT_CAPACITY: usize = 32;

/// Bounded reply text.
pub type Text = heapless::String<TEXT_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyInfo {
    pub vfo: Vfo,
    pub hz: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub vfo: Vfo,
    pub mode: OperatingMode,
}

/// AF gain, RF gain or squelch level (0-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub vfo: Vfo,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerInfo {
    pub watts: u8,
}

/// AGC setting as reported by the rig.
///
/// Replies may carry codes 0-9 while only 0-4 can be set, so the raw code
/// is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgcInfo {
    pub vfo: Vfo,
    pub code: u8,
}

impl AgcInfo {
    pub fn new(vfo: Vfo, agc: AgcType) -> Self {
        AgcInfo {
            vfo,
            code: agc.code(),
        }
    }

    /// The settable AGC type for this code, if it is one.
    pub fn agc(&self) -> Option<AgcType> {
        AgcType::from_code(self.code)
    }
}

/// CTCSS/DCS setting as reported by the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneInfo {
    pub vfo: Vfo,
    /// Raw tone-type digit (0-9 on the wire).
    pub tone_type: u8,
    /// Tone table index (0-99).
    pub code: u8,
}

impl ToneInfo {
    pub fn new(vfo: Vfo, tone_type: ToneType, code: u8) -> Self {
        ToneInfo {
            vfo,
            tone_type: tone_type.code(),
            code,
        }
    }

    pub fn tone(&self) -> Option<ToneType> {
        ToneType::from_code(self.tone_type)
    }
}

/// Free-text reply (firmware version, radio identity).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextInfo {
    pub text: Text,
    /// Set when the reply was longer than [`TEXT_CAPACITY`] and cut short.
    pub truncated: bool,
}

impl TextInfo {
    /// Copy `s` up to capacity, recording whether anything was dropped.
    pub fn from_str_truncating(s: &str) -> Self {
        let mut text = Text::new();
        let mut truncated = false;
        for c in s.chars() {
            if text.push(c).is_err() {
                truncated = true;
                break;
            }
        }
        TextInfo { text, truncated }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl fmt::Display for TextInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_str())
    }
}

/// A setting that can be read from the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Frequency(Vfo),
    Mode(Vfo),
    AfGain(Vfo),
    RfGain(Vfo),
    Squelch(Vfo),
    Power,
    Agc(Vfo),
    Split,
    Tone(Vfo),
    AutoInfo,
    FirmwareVersion,
    RadioInfo,
}

/// A decoded value, one variant per [`Query`].
///
/// Passing an `Answer` to [`build_answer`](crate::commands::build_answer)
/// produces the command that sets that value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Frequency(FrequencyInfo),
    Mode(ModeInfo),
    AfGain(LevelInfo),
    RfGain(LevelInfo),
    Squelch(LevelInfo),
    Power(PowerInfo),
    Agc(AgcInfo),
    Split(bool),
    Tone(ToneInfo),
    AutoInfo(bool),
    FirmwareVersion(TextInfo),
    RadioInfo(TextInfo),
}

impl Answer {
    /// The query this answer responds to.
    pub fn query(&self) -> Query {
        match self {
            Answer::Frequency(f) => Query::Frequency(f.vfo),
            Answer::Mode(m) => Query::Mode(m.vfo),
            Answer::AfGain(l) => Query::AfGain(l.vfo),
            Answer::RfGain(l) => Query::RfGain(l.vfo),
            Answer::Squelch(l) => Query::Squelch(l.vfo),
            Answer::Power(_) => Query::Power,
            Answer::Agc(a) => Query::Agc(a.vfo),
            Answer::Split(_) => Query::Split,
            Answer::Tone(t) => Query::Tone(t.vfo),
            Answer::AutoInfo(_) => Query::AutoInfo,
            Answer::FirmwareVersion(_) => Query::FirmwareVersion,
            Answer::RadioInfo(_) => Query::RadioInfo,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Frequency(i) => write!(f, "{} {} Hz", i.vfo, i.hz),
            Answer::Mode(i) => write!(f, "{} {}", i.vfo, i.mode),
            Answer::AfGain(i) | Answer::RfGain(i) | Answer::Squelch(i) => {
                write!(f, "{} {}", i.vfo, i.level)
            }
            Answer::Power(p) => write!(f, "{} W", p.watts),
            Answer::Agc(a) => match a.agc() {
                Some(agc) => write!(f, "{} {}", a.vfo, agc),
                None => write!(f, "{} code {}", a.vfo, a.code),
            },
            Answer::Split(on) | Answer::AutoInfo(on) => f.write_str(if *on { "on" } else { "off" }),
            Answer::Tone(t) => match t.tone() {
                Some(kind) => write!(f, "{} {} {:02}", t.vfo, kind, t.code),
                None => write!(f, "{} type {} {:02}", t.vfo, t.tone_type, t.code),
            },
            Answer::FirmwareVersion(t) | Answer::RadioInfo(t) => fmt::Display::fmt(t, f),
        }
    }
}

/// A command that changes rig state and gets no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BandUp(Vfo),
    BandDown(Vfo),
    BandSelect(Vfo, Band),
    /// Copy VFO-A to VFO-B.
    VfoAToB,
    /// Copy VFO-B to VFO-A.
    VfoBToA,
}
