//! Yaesu FTX-1 CAT command codec.
//!
//! The FTX-1 is driven by semicolon-terminated ASCII commands: a two-letter
//! opcode, zero-padded fields, then `;`. This crate provides:
//!
//! - **Command builders** ([`commands`]) -- one range-checked `cmd_*`
//!   function per operation, plus [`cmd_raw`](commands::cmd_raw) for opcodes
//!   without a wrapper.
//! - **Reply parsers** ([`responses`]) -- opcode check, fixed-width field
//!   extraction, range re-validation.
//! - **Typed operations** ([`operation`]) -- [`Query`], [`Answer`] and
//!   [`Action`] cover every supported command exhaustively.
//! - **Framing** ([`protocol`]) and the [`CatCommand`] token ([`token`]).
//! - **Client** ([`client`]) -- a request/reply driver over any
//!   [`Transport`](ftx1_core::Transport).
//!
//! Everything except the client is pure: no I/O, no logging, no state.
//!
//! # Example
//!
//! ```
//! use ftx1_cat::commands::cmd_set_frequency;
//! use ftx1_cat::responses::parse_mode_response;
//! use ftx1_core::{OperatingMode, Vfo};
//!
//! let cmd = cmd_set_frequency(Vfo::Main, 14_250_000).unwrap();
//! assert_eq!(cmd.to_string(), "FA014250000;");
//!
//! let mode = parse_mode_response("MD103").unwrap();
//! assert_eq!(mode.vfo, Vfo::Sub);
//! assert_eq!(mode.mode, OperatingMode::Cw);
//! ```

pub mod client;
pub mod commands;
pub mod operation;
pub mod protocol;
pub mod responses;
pub mod token;
pub mod validate;

pub use client::{CatClient, ClientConfig};
pub use operation::{
    Action, AgcInfo, Answer, FrequencyInfo, LevelInfo, ModeInfo, PowerInfo, Query, TextInfo,
    ToneInfo,
};
pub use token::{CatCommand, CommandKind, Opcode};
