#![forbid(unsafe_code)]

//! Host-agnostic ANSI/VT terminal engine.
//!
//! `retroterm-core` is the platform-independent terminal model at the heart
//! of RetroTerm. It turns the raw byte stream a child process writes behind
//! a pseudo-terminal into an in-memory character grid (cursor position,
//! per-cell styling, charset mappings, and screen contents) without any
//! host I/O dependencies.
//!
//! # Primary responsibilities
//!
//! - **Decoder**: incremental UTF-8 decoding across arbitrary chunk splits.
//! - **Parser**: the escape-sequence state machine (C0 controls, CSI, SCS,
//!   simple ESC sequences, OSC/DCS string skipping).
//! - **Screen**: cell grid, cursor, SGR attributes, charsets, DEC modes.
//! - **Terminal**: the facade wiring all three behind `process(&[u8])`.
//!
//! The parser and screen meet only at the [`TerminalActions`] trait, so a
//! test harness can swap in a recorder where the real screen would be.
//!
//! # Design principles
//!
//! - **No I/O**: all types are pure data + logic; the host supplies bytes.
//! - **Never fails**: malformed input is consumed and ignored, numeric
//!   inputs are clamped, and no operation panics or returns an error.
//! - **Deterministic**: identical byte sequences always produce identical
//!   state.

pub mod actions;
pub mod cell;
pub mod charset;
pub mod cursor;
pub mod decoder;
pub mod grid;
pub mod modes;
pub mod parser;
pub mod screen;
pub mod terminal;

pub use actions::TerminalActions;
pub use cell::{Cell, Color, SgrAttrs, SgrFlags};
pub use charset::{Charset, CharsetState};
pub use cursor::{Cursor, SavedCursor};
pub use decoder::Utf8Decoder;
pub use grid::Grid;
pub use modes::DecModes;
pub use parser::{Parser, ParserState};
pub use screen::Screen;
pub use terminal::{TermConfig, Terminal};
