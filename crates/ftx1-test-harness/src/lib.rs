//! ftx1-test-harness: a scripted transport for testing FTX-1 CAT exchanges
//! without a radio attached.

pub mod mock_serial;

pub use mock_serial::MockTransport;
