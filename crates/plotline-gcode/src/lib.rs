#![warn(missing_docs)]

//! Motion command grammar for plotline devices.
//!
//! This crate validates user-entered motion commands against a small fixed
//! G/M-code grammar and frames them into the newline-terminated lines the
//! device expects.
//!
//! # Example
//!
//! ```
//! use plotline_gcode::{validate, Command};
//!
//! let cmd = validate("G01 10 020 5").unwrap();
//! assert!(matches!(cmd, Command::FeedMove { .. }));
//! assert_eq!(cmd.lines(), vec!["G01", "10", "020", "5"]);
//!
//! assert!(validate("G99").is_err());
//! ```

pub mod command;
pub mod error;

pub use command::{validate, Argument, Command, Positioning, Units};
pub use error::GrammarError;

/// Human-readable list of every accepted command.
pub const COMMAND_REFERENCE: &str = "\
G00 {X} {Y}: move at max speed to (x, y)
G01 {X} {Y} {F}: move at feedrate to (x, y)
G90: absolute mode (moves from 0)
G91: relative mode (moves from last position)
G20: inches
G21: millimeters
M02: end of program (shutdown)
M06: tool change
M72: restore modal state";
