//! CAT line framing.
//!
//! FTX-1 CAT traffic is plain ASCII. A command is a two-letter opcode,
//! optional parameter digits or text, and the `;` terminator:
//!
//! ```text
//! <opcode><payload>;
//! ```
//!
//! Replies echo the opcode followed by the answer fields. A command the rig
//! does not accept is answered with `?;`. This module only deals with
//! terminators and noise; field layout is handled by
//! [`responses`](crate::responses).

use bytes::{BufMut, BytesMut};

/// CAT command/reply terminator byte.
pub const TERMINATOR: u8 = b';';

/// Error reply from the rig: `?;`.
pub const ERROR_RESPONSE: &[u8] = b"?;";

/// Result of attempting to frame one reply from a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    /// A complete reply was framed.
    Reply {
        /// Reply text without the terminator (e.g. `"FA014250000"`).
        text: String,
        /// Number of bytes consumed from the input buffer, terminator included.
        consumed: usize,
    },

    /// The rig answered `?;`. Carries the number of bytes consumed.
    Rejected(usize),

    /// A terminated frame whose body is not valid UTF-8.
    Garbled(usize),

    /// No terminator in the buffer yet.
    Incomplete,
}

/// Encode a CAT command into raw bytes ready for transmission.
///
/// # Example
///
/// ```
/// use ftx1_cat::protocol::encode_command;
///
/// assert_eq!(encode_command("FA", ""), b"FA;");
/// assert_eq!(encode_command("FA", "014250000"), b"FA014250000;");
/// ```
pub fn encode_command(opcode: &str, payload: &str) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(opcode.len() + payload.len() + 1);
    buf.put_slice(opcode.as_bytes());
    buf.put_slice(payload.as_bytes());
    buf.put_u8(TERMINATOR);
    buf.to_vec()
}

/// Attempt to frame one reply from `buf`.
///
/// Control characters and other non-printable bytes in front of the reply
/// (line noise, a stray CR/LF from a terminal program) are skipped.
///
/// # Example
///
/// ```
/// use ftx1_cat::protocol::{decode_reply, DecodeResult};
///
/// match decode_reply(b"\r\nMD03;") {
///     DecodeResult::Reply { text, consumed } => {
///         assert_eq!(text, "MD03");
///         assert_eq!(consumed, 7);
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn decode_reply(buf: &[u8]) -> DecodeResult {
    let term_pos = match buf.iter().position(|&b| b == TERMINATOR) {
        Some(pos) => pos,
        None => return DecodeResult::Incomplete,
    };

    let consumed = term_pos + 1;
    let body = &buf[..term_pos];
    let start = body
        .iter()
        .position(|b| b.is_ascii_graphic())
        .unwrap_or(body.len());
    let body = &body[start..];

    if body == b"?" {
        return DecodeResult::Rejected(consumed);
    }

    match std::str::from_utf8(body) {
        Ok(text) => DecodeResult::Reply {
            text: text.to_string(),
            consumed,
        },
        Err(_) => DecodeResult::Garbled(consumed),
    }
}
