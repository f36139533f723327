//! Scripted [`Transport`] for exercising CAT exchanges without a radio.
//!
//! [`MockTransport`] holds an ordered queue of expected commands, each
//! paired with the reply the "rig" gives back. CAT is plain ASCII, so the
//! script is written as text.
//!
//! # Example
//!
//! ```
//! use ftx1_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! mock.expect("FA;", "FA014250000;");
//! mock.expect_silent("FA007074000;");
//! mock.expect("PC101;", "?;");
//! assert_eq!(mock.remaining_expectations(), 3);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

use ftx1_core::error::{Error, Result};
use ftx1_core::transport::Transport;

#[derive(Debug, Clone)]
struct Expectation {
    request: Vec<u8>,
    /// `None` when the rig stays silent (set commands, band stepping).
    reply: Option<Vec<u8>>,
}

/// A scripted [`Transport`].
///
/// Each `send()` is matched against the next expectation; a mismatch or an
/// exhausted script is a [`Error::Transport`]. The matching reply is then
/// handed out by `receive()`, at most `buf.len()` bytes per call. With no
/// reply pending, `receive()` returns [`Error::Timeout`] immediately.
#[derive(Debug)]
pub struct MockTransport {
    expectations: VecDeque<Expectation>,
    pending: VecDeque<u8>,
    connected: bool,
    sent_log: Vec<Vec<u8>>,
    receive_calls: usize,
}

impl MockTransport {
    /// A connected mock with an empty script.
    pub fn new() -> Self {
        MockTransport {
            expectations: VecDeque::new(),
            pending: VecDeque::new(),
            connected: true,
            sent_log: Vec::new(),
            receive_calls: 0,
        }
    }

    /// Expect `request` and answer it with `reply`.
    pub fn expect(&mut self, request: &str, reply: &str) {
        self.expect_bytes(request.as_bytes(), reply.as_bytes());
    }

    /// Expect `request` and answer with arbitrary bytes (noise, bad UTF-8).
    pub fn expect_bytes(&mut self, request: &[u8], reply: &[u8]) {
        self.expectations.push_back(Expectation {
            request: request.to_vec(),
            reply: Some(reply.to_vec()),
        });
    }

    /// Expect `request` and give no reply.
    pub fn expect_silent(&mut self, request: &str) {
        self.expectations.push_back(Expectation {
            request: request.as_bytes().to_vec(),
            reply: None,
        });
    }

    /// Every buffer passed to `send()`, in order.
    pub fn sent_data(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    /// [`sent_data`](Self::sent_data) as lossy text, for readable asserts.
    pub fn sent_text(&self) -> Vec<String> {
        self.sent_log
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }

    pub fn remaining_expectations(&self) -> usize {
        self.expectations.len()
    }

    /// Number of `receive()` calls made so far.
    pub fn receive_calls(&self) -> usize {
        self.receive_calls
    }

    /// When `false`, `send()` and `receive()` return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.sent_log.push(data.to_vec());

        let expectation = self.expectations.pop_front().ok_or_else(|| {
            Error::Transport(format!(
                "unscripted send {:?}",
                String::from_utf8_lossy(data)
            ))
        })?;
        if data != expectation.request.as_slice() {
            return Err(Error::Transport(format!(
                "expected {:?}, got {:?}",
                String::from_utf8_lossy(&expectation.request),
                String::from_utf8_lossy(data)
            )));
        }
        self.pending.clear();
        if let Some(reply) = expectation.reply {
            self.pending.extend(reply);
        }
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.receive_calls += 1;
        if self.pending.is_empty() {
            return Err(Error::Timeout);
        }
        let n = self.pending.len().min(buf.len());
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        self.pending.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
