//! Error types for the FTX-1 CAT toolkit.
//!
//! All fallible operations return [`Result<T>`]. Codec failures (bad builder
//! input, malformed or out-of-range replies) and link failures (timeouts,
//! serial errors, rig rejections) share one enum so callers can propagate
//! either with `?`.

/// The error type for all FTX-1 CAT operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A builder argument is outside its domain, or a raw opcode/payload
    /// cannot be framed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A reply is empty, too short, missing a mandatory field, or carries
    /// trailing characters after its last field.
    #[error("malformed reply: {0}")]
    MalformedReply(String),

    /// A reply carries a different opcode than the parser expected.
    #[error("unexpected reply opcode: expected {expected}, found {found:?}")]
    UnexpectedOpcode {
        /// Opcode(s) the parser accepts, e.g. `"FA/FB"`.
        expected: &'static str,
        /// The leading characters actually found in the reply.
        found: String,
    },

    /// A reply field parsed syntactically but its value is outside the
    /// protocol's documented domain.
    #[error("{field} value {value} outside {min}..={max}")]
    RangeViolation {
        /// Name of the offending field (e.g. `"power"`).
        field: &'static str,
        /// The value that was decoded.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// The rig answered with the CAT error reply `?;`.
    #[error("command rejected by rig")]
    Rejected,

    /// A reply did not fit in the caller-supplied buffer capacity.
    #[error("reply exceeds {0} byte buffer")]
    ReplyOverflow(usize),

    /// A transport-level error (serial port open/configure failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// Timed out waiting for a reply from the rig.
    ///
    /// Usually the rig is off, the baud rate is wrong, or the command
    /// has no answer form.
    #[error("timeout waiting for response")]
    Timeout,

    /// No connection to the rig has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the rig was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error came from the codec rather than the link.
    ///
    /// Codec errors are deterministic for a given input: sending the same
    /// command or parsing the same reply again fails the same way.
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter(_)
                | Error::MalformedReply(_)
                | Error::UnexpectedOpcode { .. }
                | Error::RangeViolation { .. }
        )
    }
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_parameter() {
        let e = Error::InvalidParameter("power 3 W outside 5..=100".into());
        assert_eq!(e.to_string(), "invalid parameter: power 3 W outside 5..=100");
    }

    #[test]
    fn display_range_violation() {
        let e = Error::RangeViolation {
            field: "power",
            value: 101,
            min: 5,
            max: 100,
        };
        assert_eq!(e.to_string(), "power value 101 outside 5..=100");
    }

    #[test]
    fn display_unexpected_opcode() {
        let e = Error::UnexpectedOpcode {
            expected: "MD",
            found: "FA".into(),
        };
        assert_eq!(
            e.to_string(),
            "unexpected reply opcode: expected MD, found \"FA\""
        );
    }

    #[test]
    fn display_rejected_and_overflow() {
        assert_eq!(Error::Rejected.to_string(), "command rejected by rig");
        assert_eq!(
            Error::ReplyOverflow(64).to_string(),
            "reply exceeds 64 byte buffer"
        );
    }

    #[test]
    fn codec_errors_are_classified() {
        assert!(Error::MalformedReply("empty".into()).is_codec_error());
        assert!(Error::InvalidParameter("x".into()).is_codec_error());
        assert!(!Error::Timeout.is_codec_error());
        assert!(!Error::Rejected.is_codec_error());
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
