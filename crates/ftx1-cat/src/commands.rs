//! FTX-1 CAT command builders.
//!
//! One `cmd_*` function per operation. Every argument is range-checked
//! before anything is formatted; out-of-range input is an
//! [`Error::InvalidParameter`], never clamped.
//!
//! All functions are pure. The caller sends the resulting [`CatCommand`]
//! over a transport and hands the reply to [`responses`](crate::responses).
//!
//! # Wire layout
//!
//! | Command | Set | Read |
//! |---|---|---|
//! | frequency | `FA014250000;` / `FB...` | `FA;` |
//! | mode | `MD` vfo + 2 digits | `MD0;` |
//! | AF/RF gain, squelch | `AG` vfo + 3 digits | `AG0;` |
//! | power | `PC` + 3 digits | `PC;` |
//! | AGC | `GT` vfo + 1 digit | `GT0;` |
//! | CTCSS/DCS | `CN` vfo + type + 2 digits | `CN0;` |

use ftx1_core::{AgcType, Band, Error, OperatingMode, Result, ToneType, Vfo};

use crate::operation::{Action, Answer, Query};
use crate::token::{CatCommand, CommandKind, Opcode};
use crate::validate::{check_frequency, check_level, check_power, check_tone_code};

fn frequency_opcode(vfo: Vfo) -> Opcode {
    match vfo {
        Vfo::Main => Opcode::FREQUENCY_MAIN,
        Vfo::Sub => Opcode::FREQUENCY_SUB,
    }
}

fn set(opcode: Opcode, args: std::fmt::Arguments<'_>) -> Result<CatCommand> {
    CatCommand::formatted(opcode, CommandKind::Set, args)
}

fn read(opcode: Opcode) -> CatCommand {
    CatCommand::bare(opcode, CommandKind::Read)
}

fn read_vfo(opcode: Opcode, vfo: Vfo) -> Result<CatCommand> {
    CatCommand::formatted(opcode, CommandKind::Read, format_args!("{}", vfo.code()))
}

fn set_level(opcode: Opcode, vfo: Vfo, level: u8) -> Result<CatCommand> {
    check_level(level)?;
    set(opcode, format_args!("{}{:03}", vfo.code(), level))
}

// ---------------------------------------------------------------
// Frequency and mode
// ---------------------------------------------------------------

/// `FA`/`FB` + 9 zero-padded digits in hertz.
pub fn cmd_set_frequency(vfo: Vfo, hz: u32) -> Result<CatCommand> {
    check_frequency(hz)?;
    set(frequency_opcode(vfo), format_args!("{hz:09}"))
}

/// `FA;` or `FB;`. The VFO is carried by the opcode.
pub fn cmd_read_frequency(vfo: Vfo) -> Result<CatCommand> {
    Ok(read(frequency_opcode(vfo)))
}

/// `MD` + vfo digit + 2-digit mode code (`MD003;` = MAIN CW).
pub fn cmd_set_mode(vfo: Vfo, mode: OperatingMode) -> Result<CatCommand> {
    set(Opcode::MODE, format_args!("{}{:02}", vfo.code(), mode.code()))
}

pub fn cmd_read_mode(vfo: Vfo) -> Result<CatCommand> {
    read_vfo(Opcode::MODE, vfo)
}

// ---------------------------------------------------------------
// Gains and squelch
// ---------------------------------------------------------------

pub fn cmd_set_af_gain(vfo: Vfo, level: u8) -> Result<CatCommand> {
    set_level(Opcode::AF_GAIN, vfo, level)
}

pub fn cmd_read_af_gain(vfo: Vfo) -> Result<CatCommand> {
    read_vfo(Opcode::AF_GAIN, vfo)
}

pub fn cmd_set_rf_gain(vfo: Vfo, level: u8) -> Result<CatCommand> {
    set_level(Opcode::RF_GAIN, vfo, level)
}

pub fn cmd_read_rf_gain(vfo: Vfo) -> Result<CatCommand> {
    read_vfo(Opcode::RF_GAIN, vfo)
}

pub fn cmd_set_squelch(vfo: Vfo, level: u8) -> Result<CatCommand> {
    set_level(Opcode::SQUELCH, vfo, level)
}

pub fn cmd_read_squelch(vfo: Vfo) -> Result<CatCommand> {
    read_vfo(Opcode::SQUELCH, vfo)
}

// ---------------------------------------------------------------
// Power and AGC
// ---------------------------------------------------------------

/// `PC` + 3 digits. Accepts 5-100 W.
pub fn cmd_set_power(watts: u8) -> Result<CatCommand> {
    check_power(watts)?;
    set(Opcode::POWER, format_args!("{watts:03}"))
}

pub fn cmd_read_power() -> Result<CatCommand> {
    Ok(read(Opcode::POWER))
}

pub fn cmd_set_agc(vfo: Vfo, agc: AgcType) -> Result<CatCommand> {
    set(Opcode::AGC, format_args!("{}{}", vfo.code(), agc.code()))
}

pub fn cmd_read_agc(vfo: Vfo) -> Result<CatCommand> {
    read_vfo(Opcode::AGC, vfo)
}

// ---------------------------------------------------------------
// Band stack and VFO copy
// ---------------------------------------------------------------

pub fn cmd_band_up(vfo: Vfo) -> Result<CatCommand> {
    set(Opcode::BAND_UP, format_args!("{}", vfo.code()))
}

pub fn cmd_band_down(vfo: Vfo) -> Result<CatCommand> {
    set(Opcode::BAND_DOWN, format_args!("{}", vfo.code()))
}

/// `BS` + vfo digit + 2-digit band index (`BS005;` = MAIN to 20 m).
pub fn cmd_band_select(vfo: Vfo, band: Band) -> Result<CatCommand> {
    set(
        Opcode::BAND_SELECT,
        format_args!("{}{:02}", vfo.code(), band.index()),
    )
}

pub fn cmd_vfo_a_to_b() -> Result<CatCommand> {
    Ok(CatCommand::bare(Opcode::VFO_A_TO_B, CommandKind::Set))
}

pub fn cmd_vfo_b_to_a() -> Result<CatCommand> {
    Ok(CatCommand::bare(Opcode::VFO_B_TO_A, CommandKind::Set))
}

// ---------------------------------------------------------------
// Split, tone, auto-information
// ---------------------------------------------------------------

pub fn cmd_set_split(on: bool) -> Result<CatCommand> {
    set(Opcode::SPLIT, format_args!("{}", u8::from(on)))
}

pub fn cmd_read_split() -> Result<CatCommand> {
    Ok(read(Opcode::SPLIT))
}

/// `CN` + vfo digit + tone-type digit + 2-digit table index.
pub fn cmd_set_tone(vfo: Vfo, tone_type: ToneType, code: u8) -> Result<CatCommand> {
    check_tone_code(code)?;
    set(
        Opcode::TONE,
        format_args!("{}{}{:02}", vfo.code(), tone_type.code(), code),
    )
}

pub fn cmd_read_tone(vfo: Vfo) -> Result<CatCommand> {
    read_vfo(Opcode::TONE, vfo)
}

/// `AI1;` makes the rig report state changes unprompted; `AI0;` stops it.
pub fn cmd_set_auto_info(on: bool) -> Result<CatCommand> {
    set(Opcode::AUTO_INFO, format_args!("{}", u8::from(on)))
}

pub fn cmd_read_auto_info() -> Result<CatCommand> {
    Ok(read(Opcode::AUTO_INFO))
}

// ---------------------------------------------------------------
// Identity
// ---------------------------------------------------------------

pub fn cmd_read_firmware_version() -> Result<CatCommand> {
    Ok(read(Opcode::FIRMWARE_VERSION))
}

pub fn cmd_read_radio_info() -> Result<CatCommand> {
    Ok(read(Opcode::RADIO_INFO))
}

// ---------------------------------------------------------------
// Generic
// ---------------------------------------------------------------

/// Build any command from an opcode and a verbatim payload.
///
/// Only the framing is checked: a two-letter uppercase opcode, no `;` in
/// the payload, and at most [`PAYLOAD_CAPACITY`](crate::token::PAYLOAD_CAPACITY)
/// bytes. The payload is otherwise passed through untouched. An empty
/// payload yields a read.
///
/// ```
/// use ftx1_cat::commands::cmd_raw;
///
/// let cmd = cmd_raw("EX", "0301").unwrap();
/// assert_eq!(cmd.to_string(), "EX0301;");
/// ```
pub fn cmd_raw(opcode: &str, payload: &str) -> Result<CatCommand> {
    let opcode = Opcode::new(opcode)?;
    let kind = if payload.is_empty() {
        CommandKind::Read
    } else {
        CommandKind::Set
    };
    CatCommand::with_text(opcode, kind, payload)
}

// ---------------------------------------------------------------
// Dispatch over typed operations
// ---------------------------------------------------------------

/// The read command for `query`.
pub fn build_query(query: Query) -> Result<CatCommand> {
    match query {
        Query::Frequency(vfo) => cmd_read_frequency(vfo),
        Query::Mode(vfo) => cmd_read_mode(vfo),
        Query::AfGain(vfo) => cmd_read_af_gain(vfo),
        Query::RfGain(vfo) => cmd_read_rf_gain(vfo),
        Query::Squelch(vfo) => cmd_read_squelch(vfo),
        Query::Power => cmd_read_power(),
        Query::Agc(vfo) => cmd_read_agc(vfo),
        Query::Split => cmd_read_split(),
        Query::Tone(vfo) => cmd_read_tone(vfo),
        Query::AutoInfo => cmd_read_auto_info(),
        Query::FirmwareVersion => cmd_read_firmware_version(),
        Query::RadioInfo => cmd_read_radio_info(),
    }
}

/// The set command that writes `answer` to the rig.
///
/// # Errors
///
/// [`Error::InvalidParameter`] for read-only values (firmware version,
/// radio info), for AGC or tone-type codes that cannot be set, and for any
/// value outside its builder's range.
pub fn build_answer(answer: &Answer) -> Result<CatCommand> {
    match answer {
        Answer::Frequency(f) => cmd_set_frequency(f.vfo, f.hz),
        Answer::Mode(m) => cmd_set_mode(m.vfo, m.mode),
        Answer::AfGain(l) => cmd_set_af_gain(l.vfo, l.level),
        Answer::RfGain(l) => cmd_set_rf_gain(l.vfo, l.level),
        Answer::Squelch(l) => cmd_set_squelch(l.vfo, l.level),
        Answer::Power(p) => cmd_set_power(p.watts),
        Answer::Agc(a) => {
            let agc = a.agc().ok_or_else(|| {
                Error::InvalidParameter(format!("AGC code {} cannot be set", a.code))
            })?;
            cmd_set_agc(a.vfo, agc)
        }
        Answer::Split(on) => cmd_set_split(*on),
        Answer::Tone(t) => {
            let tone_type = t.tone().ok_or_else(|| {
                Error::InvalidParameter(format!("tone type {} cannot be set", t.tone_type))
            })?;
            cmd_set_tone(t.vfo, tone_type, t.code)
        }
        Answer::AutoInfo(on) => cmd_set_auto_info(*on),
        Answer::FirmwareVersion(_) => Err(Error::InvalidParameter(
            "firmware version is read-only".into(),
        )),
        Answer::RadioInfo(_) => Err(Error::InvalidParameter("radio info is read-only".into())),
    }
}

pub fn build_action(action: Action) -> Result<CatCommand> {
    match action {
        Action::BandUp(vfo) => cmd_band_up(vfo),
        Action::BandDown(vfo) => cmd_band_down(vfo),
        Action::BandSelect(vfo, band) => cmd_band_select(vfo, band),
        Action::VfoAToB => cmd_vfo_a_to_b(),
        Action::VfoBToA => cmd_vfo_b_to_a(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{AgcInfo, FrequencyInfo, LevelInfo, PowerInfo, TextInfo, ToneInfo};

    fn wire(cmd: Result<CatCommand>) -> String {
        cmd.expect("builder should succeed").to_string()
    }

    // ---------------------------------------------------------------
    // Frequency / mode
    // ---------------------------------------------------------------

    #[test]
    fn set_frequency_main_payload() {
        let cmd = cmd_set_frequency(Vfo::Main, 14_250_000).unwrap();
        assert_eq!(cmd.opcode(), Opcode::FREQUENCY_MAIN);
        assert_eq!(cmd.payload(), "014250000");
        assert_eq!(cmd.kind(), CommandKind::Set);
        assert_eq!(cmd.to_wire(), b"FA014250000;");
    }

    #[test]
    fn set_frequency_sub_uses_fb() {
        assert_eq!(wire(cmd_set_frequency(Vfo::Sub, 7_074_000)), "FB007074000;");
    }

    #[test]
    fn set_frequency_rejects_ten_digits() {
        let err = cmd_set_frequency(Vfo::Main, 1_000_000_000).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn read_frequency() {
        let cmd = cmd_read_frequency(Vfo::Sub).unwrap();
        assert!(!cmd.has_payload());
        assert_eq!(cmd.kind(), CommandKind::Read);
        assert_eq!(cmd.to_string(), "FB;");
    }

    #[test]
    fn mode_commands() {
        assert_eq!(wire(cmd_set_mode(Vfo::Main, OperatingMode::Cw)), "MD003;");
        assert_eq!(wire(cmd_set_mode(Vfo::Sub, OperatingMode::C4fm)), "MD114;");
        assert_eq!(wire(cmd_read_mode(Vfo::Sub)), "MD1;");
    }

    // ---------------------------------------------------------------
    // Levels / power / AGC
    // ---------------------------------------------------------------

    #[test]
    fn level_commands_are_three_digits() {
        assert_eq!(wire(cmd_set_af_gain(Vfo::Main, 128)), "AG0128;");
        assert_eq!(wire(cmd_set_rf_gain(Vfo::Sub, 0)), "RG1000;");
        assert_eq!(wire(cmd_set_squelch(Vfo::Main, 255)), "SQ0255;");
        assert_eq!(wire(cmd_read_af_gain(Vfo::Main)), "AG0;");
        assert_eq!(wire(cmd_read_rf_gain(Vfo::Sub)), "RG1;");
        assert_eq!(wire(cmd_read_squelch(Vfo::Sub)), "SQ1;");
    }

    #[test]
    fn power_bounds() {
        assert!(cmd_set_power(4).is_err());
        assert!(cmd_set_power(101).is_err());
        assert_eq!(wire(cmd_set_power(5)), "PC005;");
        assert_eq!(wire(cmd_set_power(100)), "PC100;");
        assert_eq!(wire(cmd_read_power()), "PC;");
    }

    #[test]
    fn agc_commands() {
        assert_eq!(wire(cmd_set_agc(Vfo::Main, AgcType::Auto)), "GT00;");
        assert_eq!(wire(cmd_set_agc(Vfo::Sub, AgcType::Off)), "GT14;");
        assert_eq!(wire(cmd_read_agc(Vfo::Main)), "GT0;");
    }

    // ---------------------------------------------------------------
    // Band / VFO / split / tone / AI / identity
    // ---------------------------------------------------------------

    #[test]
    fn band_commands() {
        assert_eq!(wire(cmd_band_up(Vfo::Main)), "BU0;");
        assert_eq!(wire(cmd_band_down(Vfo::Sub)), "BD1;");
        assert_eq!(wire(cmd_band_select(Vfo::Main, Band::Band20m)), "BS005;");
        assert_eq!(wire(cmd_band_select(Vfo::Sub, Band::Band70cm)), "BS114;");
    }

    #[test]
    fn vfo_copy_has_no_payload() {
        let ab = cmd_vfo_a_to_b().unwrap();
        assert!(!ab.has_payload());
        assert_eq!(ab.kind(), CommandKind::Set);
        assert_eq!(ab.to_string(), "AB;");
        assert_eq!(wire(cmd_vfo_b_to_a()), "BA;");
    }

    #[test]
    fn split_and_auto_info() {
        assert_eq!(wire(cmd_set_split(true)), "ST1;");
        assert_eq!(wire(cmd_set_split(false)), "ST0;");
        assert_eq!(wire(cmd_read_split()), "ST;");
        assert_eq!(wire(cmd_set_auto_info(true)), "AI1;");
        assert_eq!(wire(cmd_read_auto_info()), "AI;");
    }

    #[test]
    fn tone_commands() {
        assert_eq!(wire(cmd_set_tone(Vfo::Main, ToneType::Ctcss, 12)), "CN0012;");
        assert_eq!(wire(cmd_set_tone(Vfo::Sub, ToneType::Dcs, 99)), "CN1199;");
        assert!(cmd_set_tone(Vfo::Main, ToneType::Ctcss, 100).is_err());
        assert_eq!(wire(cmd_read_tone(Vfo::Sub)), "CN1;");
    }

    #[test]
    fn identity_reads() {
        assert_eq!(wire(cmd_read_firmware_version()), "VE;");
        assert_eq!(wire(cmd_read_radio_info()), "RI;");
    }

    // ---------------------------------------------------------------
    // Raw
    // ---------------------------------------------------------------

    #[test]
    fn raw_is_opcode_payload_terminator() {
        let cmd = cmd_raw("EX", "0301").unwrap();
        assert_eq!(cmd.to_wire(), b"EX0301;");
        assert_eq!(cmd.kind(), CommandKind::Set);
        let read = cmd_raw("IF", "").unwrap();
        assert_eq!(read.to_wire(), b"IF;");
        assert_eq!(read.kind(), CommandKind::Read);
    }

    #[test]
    fn raw_checks_framing_only() {
        // No semantic validation: a 10-digit frequency passes through.
        assert_eq!(wire(cmd_raw("FA", "1234567890")), "FA1234567890;");
        assert!(cmd_raw("fa", "").is_err());
        assert!(cmd_raw("FAB", "").is_err());
        assert!(cmd_raw("FA", "0;PC100").is_err());
        assert!(cmd_raw("FA", &"0".repeat(32)).is_err());
        assert_eq!(wire(cmd_raw("MC", "name 1")), "MCname 1;");
    }

    // ---------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------

    #[test]
    fn build_query_matches_read_builders() {
        assert_eq!(wire(build_query(Query::Frequency(Vfo::Main))), "FA;");
        assert_eq!(wire(build_query(Query::Mode(Vfo::Sub))), "MD1;");
        assert_eq!(wire(build_query(Query::Power)), "PC;");
        assert_eq!(wire(build_query(Query::Tone(Vfo::Main))), "CN0;");
        assert_eq!(wire(build_query(Query::RadioInfo)), "RI;");
    }

    #[test]
    fn build_answer_produces_set_commands() {
        let f = Answer::Frequency(FrequencyInfo {
            vfo: Vfo::Main,
            hz: 14_250_000,
        });
        assert_eq!(wire(build_answer(&f)), "FA014250000;");
        let sq = Answer::Squelch(LevelInfo {
            vfo: Vfo::Sub,
            level: 40,
        });
        assert_eq!(wire(build_answer(&sq)), "SQ1040;");
        let tone = Answer::Tone(ToneInfo::new(Vfo::Main, ToneType::Dcs, 5));
        assert_eq!(wire(build_answer(&tone)), "CN0105;");
    }

    #[test]
    fn build_answer_rejects_unsettable_values() {
        assert!(build_answer(&Answer::Power(PowerInfo { watts: 200 })).is_err());
        assert!(build_answer(&Answer::Agc(AgcInfo { vfo: Vfo::Main, code: 8 })).is_err());
        assert!(build_answer(&Answer::FirmwareVersion(TextInfo::default())).is_err());
        assert!(build_answer(&Answer::RadioInfo(TextInfo::default())).is_err());
    }

    #[test]
    fn build_action_commands() {
        assert_eq!(wire(build_action(Action::BandUp(Vfo::Sub))), "BU1;");
        assert_eq!(
            wire(build_action(Action::BandSelect(Vfo::Main, Band::Air))),
            "BS012;"
        );
        assert_eq!(wire(build_action(Action::VfoAToB)), "AB;");
    }
}
