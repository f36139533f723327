//! Request/reply driver on top of a [`Transport`].
//!
//! [`CatClient`] writes one command, optionally waits for the single reply
//! line it produces, and hands the text to the parsers. It keeps no state
//! about the rig and never retries: a timeout or rejection goes straight
//! back to the caller.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace, warn};

use ftx1_core::{Error, Result, Transport};

use crate::commands::{build_action, build_answer, build_query, cmd_raw};
use crate::operation::{Action, Answer, Query};
use crate::protocol::{decode_reply, DecodeResult};
use crate::responses::parse_reply;
use crate::token::CatCommand;
use crate::validate::expected_response_length;

/// Timing and buffer limits for a [`CatClient`].
///
/// ```
/// use ftx1_cat::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .reply_timeout(Duration::from_millis(300))
///     .reject_window(Duration::from_millis(50));
/// assert_eq!(config.max_reply_len, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// How long to wait for a complete reply line (default 500 ms).
    pub reply_timeout: Duration,
    /// Largest reply accepted, terminator included (default 64 bytes).
    pub max_reply_len: usize,
    /// After a command that gets no reply, how long to listen for a `?;`
    /// rejection. Zero (the default) does not listen at all.
    pub reject_window: Duration,
}

impl ClientConfig {
    pub fn new() -> Self {
        ClientConfig {
            reply_timeout: Duration::from_millis(500),
            max_reply_len: 64,
            reject_window: Duration::ZERO,
        }
    }

    pub fn reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    pub fn max_reply_len(mut self, len: usize) -> Self {
        self.max_reply_len = len;
        self
    }

    pub fn reject_window(mut self, window: Duration) -> Self {
        self.reject_window = window;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one bounded read.
enum Received {
    Line(String),
    Nothing,
}

/// CAT request/reply client.
///
/// Bytes that arrive after a framed line are kept and handed out by the
/// next [`next_line`](Self::next_line) call, so a burst of auto-info
/// reports read in one go is not lost.
///
/// # Example
///
/// ```no_run
/// use ftx1_cat::{CatClient, ClientConfig, Query, Answer};
/// use ftx1_core::{Transport, Vfo};
///
/// # async fn example<T: Transport>(transport: T) -> ftx1_core::Result<()> {
/// let mut client = CatClient::new(transport, ClientConfig::default());
/// if let Answer::Frequency(f) = client.query(Query::Frequency(Vfo::Main)).await? {
///     println!("VFO-A on {} Hz", f.hz);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CatClient<T: Transport> {
    transport: T,
    config: ClientConfig,
    /// Received bytes not yet framed into a line. Never longer than
    /// `config.max_reply_len`.
    rx: Vec<u8>,
}

impl<T: Transport> CatClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        CatClient {
            transport,
            config,
            rx: Vec::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Write `cmd` without reading anything back.
    pub async fn send(&mut self, cmd: &CatCommand) -> Result<()> {
        if !self.transport.is_connected() {
            return Err(Error::NotConnected);
        }
        debug!(command = %cmd, "CAT send");
        self.transport.send(&cmd.to_wire()).await
    }

    /// Send `cmd` and, if `expect_reply`, return the reply text without its
    /// terminator.
    ///
    /// Unframed bytes left over from earlier traffic are dropped first so
    /// they cannot be taken for the reply.
    ///
    /// # Errors
    ///
    /// - [`Error::Rejected`] if the rig answers `?;` (also detected within
    ///   the reject window when no reply is expected)
    /// - [`Error::Timeout`] if no complete line arrives in time
    /// - [`Error::ReplyOverflow`] if the line exceeds `max_reply_len`
    /// - transport errors as returned by the transport
    pub async fn send_raw(
        &mut self,
        cmd: &CatCommand,
        expect_reply: bool,
    ) -> Result<Option<String>> {
        if !self.rx.is_empty() {
            trace!(stale = ?String::from_utf8_lossy(&self.rx), "dropping stale input");
            self.rx.clear();
        }
        self.send(cmd).await?;

        if expect_reply {
            let chunk =
                expected_response_length(cmd.opcode()).unwrap_or(self.config.max_reply_len);
            match self.read_line(chunk, self.config.reply_timeout).await? {
                Received::Line(text) => {
                    debug!(reply = %text, "CAT reply");
                    Ok(Some(text))
                }
                Received::Nothing => {
                    warn!(command = %cmd, "no reply from rig");
                    Err(Error::Timeout)
                }
            }
        } else if self.config.reject_window.is_zero() {
            Ok(None)
        } else {
            match self
                .read_line(self.config.max_reply_len, self.config.reject_window)
                .await?
            {
                Received::Nothing => Ok(None),
                Received::Line(text) => {
                    debug!(unsolicited = %text, "ignoring line after set command");
                    Ok(None)
                }
            }
        }
    }

    /// Wait up to `timeout` for the next line from the rig, solicited or
    /// not.
    ///
    /// Returns `Ok(None)` when nothing complete arrives in time; a partial
    /// line stays buffered for the next call. A `?;` is returned as
    /// [`Error::Rejected`].
    pub async fn next_line(&mut self, timeout: Duration) -> Result<Option<String>> {
        if !self.transport.is_connected() {
            return Err(Error::NotConnected);
        }
        match self.read_line(self.config.max_reply_len, timeout).await? {
            Received::Line(text) => {
                debug!(line = %text, "CAT rx line");
                Ok(Some(text))
            }
            Received::Nothing => Ok(None),
        }
    }

    /// Read the rig's answer to `query` and parse it.
    pub async fn query(&mut self, query: Query) -> Result<Answer> {
        let cmd = build_query(query)?;
        let reply = self.send_raw(&cmd, true).await?.ok_or(Error::Timeout)?;
        parse_reply(query, &reply)
    }

    /// Write `answer` to the rig.
    pub async fn apply(&mut self, answer: &Answer) -> Result<()> {
        let cmd = build_answer(answer)?;
        self.send_raw(&cmd, false).await.map(|_| ())
    }

    pub async fn perform(&mut self, action: Action) -> Result<()> {
        let cmd = build_action(action)?;
        self.send_raw(&cmd, false).await.map(|_| ())
    }

    /// Send an arbitrary opcode and payload.
    pub async fn raw(
        &mut self,
        opcode: &str,
        payload: &str,
        expect_reply: bool,
    ) -> Result<Option<String>> {
        let cmd = cmd_raw(opcode, payload)?;
        self.send_raw(&cmd, expect_reply).await
    }

    pub async fn close(&mut self) -> Result<()> {
        self.rx.clear();
        self.transport.close().await
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Read until one terminated line is framed or `limit` elapses.
    ///
    /// Each read asks for at most the room left under `max_reply_len`, so
    /// the buffer never holds more than one reply's worth of bytes.
    async fn read_line(&mut self, chunk: usize, limit: Duration) -> Result<Received> {
        let deadline = Instant::now() + limit;
        let max = self.config.max_reply_len;
        let mut buf = vec![0u8; chunk.clamp(1, max.max(1))];

        loop {
            if let Some(text) = self.frame_buffered(max)? {
                return Ok(Received::Line(text));
            }
            let room = max.saturating_sub(self.rx.len());
            if room == 0 {
                warn!(max, "reply exceeds buffer capacity");
                self.rx.clear();
                return Err(Error::ReplyOverflow(max));
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let want = room.min(buf.len());
            let read = self.transport.receive(&mut buf[..want], remaining);
            match tokio::time::timeout(remaining, read).await {
                Ok(Ok(n)) => {
                    trace!(bytes = ?String::from_utf8_lossy(&buf[..n]), "CAT rx");
                    self.rx.extend_from_slice(&buf[..n]);
                }
                Ok(Err(Error::Timeout)) | Err(_) => break,
                Ok(Err(e)) => return Err(e),
            }
        }

        if !self.rx.is_empty() {
            trace!(partial = ?String::from_utf8_lossy(&self.rx), "unterminated input buffered");
        }
        Ok(Received::Nothing)
    }

    /// Frame one line out of the buffered bytes, if a terminator is there.
    fn frame_buffered(&mut self, max: usize) -> Result<Option<String>> {
        let (consumed, outcome) = match decode_reply(&self.rx) {
            DecodeResult::Incomplete => return Ok(None),
            DecodeResult::Reply { text, consumed } => (consumed, Ok(Some(text))),
            DecodeResult::Rejected(consumed) => {
                warn!("rig rejected command");
                (consumed, Err(Error::Rejected))
            }
            DecodeResult::Garbled(consumed) => (
                consumed,
                Err(Error::MalformedReply("reply is not valid UTF-8".into())),
            ),
        };
        self.rx.drain(..consumed);
        if consumed > max {
            return Err(Error::ReplyOverflow(max));
        }
        outcome
    }
}
