//! Serial transport for FTX-1 CAT control.
//!
//! Provides [`SerialTransport`], the tokio-serial implementation of
//! [`Transport`](ftx1_core::Transport), together with [`SerialConfig`] and
//! the table of baud rates the rig's CAT port accepts.

pub mod serial;

pub use serial::{
    is_supported_baud_rate, list_ports, DataBits, FlowControl, Parity, SerialConfig,
    SerialTransport, StopBits, DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES,
};
