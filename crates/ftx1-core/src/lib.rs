//! ftx1-core: shared types, error definitions, and the transport trait.
//!
//! Everything the FTX-1 CAT codec, the serial transport, and the front end
//! need to agree on lives here, so the codec can be used without pulling in
//! a serial stack.
//!
//! # Key types
//!
//! - [`Vfo`], [`OperatingMode`], [`Band`], [`AgcType`], [`ToneType`] --
//!   the radio's enumerated settings, with their CAT wire codes
//! - [`Transport`] -- byte-level link to the radio
//! - [`Error`] / [`Result`] -- error handling

pub mod band;
pub mod error;
pub mod transport;
pub mod types;

pub use band::{Band, BandRange, ParseBandError};
pub use error::{Error, Result};
pub use transport::Transport;
pub use types::*;
