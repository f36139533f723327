//! The command token: one CAT command before it is put on the wire.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use ftx1_core::{Error, Result};

use crate::protocol::encode_command;

/// Largest payload a command may carry, in bytes.
pub const PAYLOAD_CAPACITY: usize = 31;

/// Bounded payload text.
pub type Payload = heapless::String<PAYLOAD_CAPACITY>;

/// A two-letter CAT opcode such as `FA` or `MD`.
///
/// Always exactly two uppercase ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode([u8; 2]);

impl Opcode {
    pub const FREQUENCY_MAIN: Opcode = Opcode(*b"FA");
    pub const FREQUENCY_SUB: Opcode = Opcode(*b"FB");
    pub const MODE: Opcode = Opcode(*b"MD");
    pub const AF_GAIN: Opcode = Opcode(*b"AG");
    pub const RF_GAIN: Opcode = Opcode(*b"RG");
    pub const SQUELCH: Opcode = Opcode(*b"SQ");
    pub const POWER: Opcode = Opcode(*b"PC");
    pub const AGC: Opcode = Opcode(*b"GT");
    pub const BAND_UP: Opcode = Opcode(*b"BU");
    pub const BAND_DOWN: Opcode = Opcode(*b"BD");
    pub const BAND_SELECT: Opcode = Opcode(*b"BS");
    pub const VFO_A_TO_B: Opcode = Opcode(*b"AB");
    pub const VFO_B_TO_A: Opcode = Opcode(*b"BA");
    pub const SPLIT: Opcode = Opcode(*b"ST");
    pub const TONE: Opcode = Opcode(*b"CN");
    pub const AUTO_INFO: Opcode = Opcode(*b"AI");
    pub const FIRMWARE_VERSION: Opcode = Opcode(*b"VE");
    pub const RADIO_INFO: Opcode = Opcode(*b"RI");

    /// Validate and wrap an opcode string.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `s` is exactly two uppercase ASCII
    /// letters.
    pub fn new(s: &str) -> Result<Opcode> {
        match s.as_bytes() {
            &[a, b] if a.is_ascii_uppercase() && b.is_ascii_uppercase() => Ok(Opcode([a, b])),
            _ => Err(Error::InvalidParameter(format!(
                "opcode must be two uppercase letters, got {s:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Opcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Opcode::new(s)
    }
}

/// Whether a command writes a setting, asks for one, or is a rig answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Set,
    Read,
    /// Text received from the rig, split into opcode and fields.
    Answer,
}

/// One CAT command: opcode, payload, and kind.
///
/// Built by the `cmd_*` functions in [`commands`](crate::commands). The
/// payload never exceeds [`PAYLOAD_CAPACITY`] and never contains the `;`
/// terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatCommand {
    opcode: Opcode,
    payload: Payload,
    kind: CommandKind,
}

impl CatCommand {
    /// A command with no payload.
    pub(crate) fn bare(opcode: Opcode, kind: CommandKind) -> Self {
        CatCommand {
            opcode,
            payload: Payload::new(),
            kind,
        }
    }

    /// A command whose payload is produced by `format_args!`.
    ///
    /// Fails instead of truncating when the formatted text would not fit.
    pub(crate) fn formatted(
        opcode: Opcode,
        kind: CommandKind,
        args: fmt::Arguments<'_>,
    ) -> Result<Self> {
        let mut payload = Payload::new();
        payload.write_fmt(args).map_err(|_| {
            Error::InvalidParameter(format!(
                "{opcode} payload exceeds {PAYLOAD_CAPACITY} characters"
            ))
        })?;
        Ok(CatCommand {
            opcode,
            payload,
            kind,
        })
    }

    /// A command carrying `text` verbatim.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `text` is longer than
    /// [`PAYLOAD_CAPACITY`] bytes or contains the `;` terminator.
    pub(crate) fn with_text(opcode: Opcode, kind: CommandKind, text: &str) -> Result<Self> {
        if text.contains(';') {
            return Err(Error::InvalidParameter(
                "payload must not contain the ';' terminator".into(),
            ));
        }
        let payload = Payload::try_from(text).map_err(|_| {
            Error::InvalidParameter(format!(
                "payload of {} characters exceeds {PAYLOAD_CAPACITY}",
                text.len()
            ))
        })?;
        Ok(CatCommand {
            opcode,
            payload,
            kind,
        })
    }

    /// Split a received reply (without terminator) into an answer token.
    ///
    /// Only the framing is checked. Field meaning is left to the parsers in
    /// [`responses`](crate::responses).
    pub fn from_reply(reply: &str) -> Result<Self> {
        let reply = reply.strip_suffix(';').unwrap_or(reply);
        if reply.len() < 2 || !reply.is_char_boundary(2) {
            return Err(Error::MalformedReply(format!("reply too short: {reply:?}")));
        }
        let (op, rest) = reply.split_at(2);
        let opcode = Opcode::new(op)
            .map_err(|_| Error::MalformedReply(format!("no opcode in reply {reply:?}")))?;
        Self::with_text(opcode, CommandKind::Answer, rest)
            .map_err(|e| Error::MalformedReply(format!("{reply:?}: {e}")))
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn payload(&self) -> &str {
        self.payload.as_str()
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }

    /// Bytes to write to the serial line, terminator included.
    pub fn to_wire(&self) -> Vec<u8> {
        encode_command(self.opcode.as_str(), self.payload.as_str())
    }
}

impl fmt::Display for CatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{};", self.opcode, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_accepts_two_uppercase_letters() {
        assert_eq!(Opcode::new("FA").unwrap(), Opcode::FREQUENCY_MAIN);
        assert_eq!("VE".parse::<Opcode>().unwrap().as_str(), "VE");
    }

    #[test]
    fn opcode_rejects_bad_shapes() {
        for bad in ["", "F", "fa", "FA0", "F1", "ÄB"] {
            assert!(Opcode::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn bare_command_has_no_payload() {
        let cmd = CatCommand::bare(Opcode::FIRMWARE_VERSION, CommandKind::Read);
        assert!(!cmd.has_payload());
        assert_eq!(cmd.payload(), "");
        assert_eq!(cmd.to_wire(), b"VE;");
        assert_eq!(cmd.to_string(), "VE;");
    }

    #[test]
    fn formatted_payload() {
        let cmd = CatCommand::formatted(
            Opcode::FREQUENCY_MAIN,
            CommandKind::Set,
            format_args!("{:09}", 14_250_000u32),
        )
        .unwrap();
        assert!(cmd.has_payload());
        assert_eq!(cmd.payload(), "014250000");
        assert_eq!(cmd.kind(), CommandKind::Set);
        assert_eq!(cmd.to_wire(), b"FA014250000;");
    }

    #[test]
    fn formatted_payload_overflow_fails() {
        let err = CatCommand::formatted(
            Opcode::POWER,
            CommandKind::Set,
            format_args!("{:040}", 1u8),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn text_payload_capacity_is_exact() {
        let fits = "X".repeat(PAYLOAD_CAPACITY);
        assert!(CatCommand::with_text(Opcode::RADIO_INFO, CommandKind::Set, &fits).is_ok());
        let too_long = "X".repeat(PAYLOAD_CAPACITY + 1);
        assert!(CatCommand::with_text(Opcode::RADIO_INFO, CommandKind::Set, &too_long).is_err());
    }

    #[test]
    fn text_payload_rejects_only_the_terminator() {
        assert!(CatCommand::with_text(Opcode::MODE, CommandKind::Set, "0;FA").is_err());

        let cmd =
            CatCommand::with_text(Opcode::RADIO_INFO, CommandKind::Set, "my call\t").unwrap();
        assert_eq!(cmd.payload(), "my call\t");
        assert_eq!(cmd.to_wire(), b"RImy call\t;");
    }

    #[test]
    fn from_reply_splits_opcode() {
        let token = CatCommand::from_reply("MD103;").unwrap();
        assert_eq!(token.opcode(), Opcode::MODE);
        assert_eq!(token.payload(), "103");
        assert_eq!(token.kind(), CommandKind::Answer);
    }

    #[test]
    fn from_reply_rejects_garbage() {
        assert!(CatCommand::from_reply("").is_err());
        assert!(CatCommand::from_reply("?").is_err());
        assert!(CatCommand::from_reply("12345").is_err());
    }
}
