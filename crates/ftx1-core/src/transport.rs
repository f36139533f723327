//! Transport trait for the link to the radio.
//!
//! The CAT codec never touches a serial port. Whatever moves bytes to and
//! from the FTX-1 (a USB virtual COM port, a test double) implements
//! [`Transport`], and the request/reply client in `ftx1-cat` drives it.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to the radio.
///
/// Implementations deal with the physical link only. Command framing and
/// the `;` terminator are the client's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Write all of `data` to the radio.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read whatever bytes are available into `buf`, waiting up to `timeout`.
    ///
    /// Returns the number of bytes read, or
    /// [`Error::Timeout`](crate::error::Error::Timeout) if nothing arrived
    /// before the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the link. Later `send`/`receive` calls return
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;
}
