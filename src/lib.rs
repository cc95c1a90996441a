#![doc = include_str!("../README.md")]

//! An interactive line editor for raw-mode terminals.
//!
//! This crate provides cursor editing, in-memory history recall and
//! bracketed paste detection for reading one line at a time from a terminal.

pub mod buffer;
pub mod history;
pub mod keys;
pub mod raw_mode;
pub mod readline;
pub mod source;
pub mod terminal;
pub mod writer;

pub use buffer::LineBuffer;
pub use history::History;
pub use readline::{Instance, Prompt, ReadlineError, TerminalConfig};
pub use source::KeySource;
pub use terminal::{Action, Decoder, EscapeState, PasteMode};
pub use writer::TerminalWriter;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::readline::{Instance, Prompt, ReadlineError, TerminalConfig};
    pub use crate::history::History;
    pub use crate::buffer::LineBuffer;
}
