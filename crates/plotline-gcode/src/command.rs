//! Motion command grammar.
//!
//! Accepted commands, as whitespace-separated tokens:
//!
//! - `G90`, `G91`, `G20`, `G21` (no arguments)
//! - `M02`, `M06`, `M72` (no arguments)
//! - `G00 <x> <y>`
//! - `G01 <x> <y> <feed>`
//!
//! Numeric arguments are non-empty runs of ASCII digits with no sign,
//! decimal point or size limit. They are transmitted exactly as typed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// Coordinate interpretation for subsequent moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Positioning {
    /// `G90`: coordinates are measured from the origin.
    Absolute,
    /// `G91`: coordinates are measured from the last position.
    Relative,
}

/// Length unit for subsequent moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    /// `G20`
    Inches,
    /// `G21`
    Millimeters,
}

/// A numeric argument token: one or more ASCII digits, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Argument(String);

impl Argument {
    /// Accept `token` if it is a non-empty run of ASCII digits.
    pub fn parse(token: &str) -> Option<Self> {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(token.to_string()))
    }

    /// The token as typed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if it fits in a `u64`.
    pub fn value(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl TryFrom<String> for Argument {
    type Error = GrammarError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::parse(&token).ok_or_else(|| GrammarError::new(token))
    }
}

impl From<Argument> for String {
    fn from(arg: Argument) -> Self {
        arg.0
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated device command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// `G90` / `G91`
    SetPositioning(Positioning),
    /// `G20` / `G21`
    SetUnits(Units),
    /// `M02`: end of program, the device shuts down.
    EndOfProgram,
    /// `M06`
    ToolChange,
    /// `M72`: restore modal state.
    RestoreState,
    /// `G00 x y`: move at maximum speed.
    RapidMove {
        /// Target X.
        x: Argument,
        /// Target Y.
        y: Argument,
    },
    /// `G01 x y f`: move at a feed rate.
    FeedMove {
        /// Target X.
        x: Argument,
        /// Target Y.
        y: Argument,
        /// Feed rate.
        feed: Argument,
    },
}

impl Command {
    /// The opcode token.
    pub fn opcode(&self) -> &'static str {
        match self {
            Command::SetPositioning(Positioning::Absolute) => "G90",
            Command::SetPositioning(Positioning::Relative) => "G91",
            Command::SetUnits(Units::Inches) => "G20",
            Command::SetUnits(Units::Millimeters) => "G21",
            Command::EndOfProgram => "M02",
            Command::ToolChange => "M06",
            Command::RestoreState => "M72",
            Command::RapidMove { .. } => "G00",
            Command::FeedMove { .. } => "G01",
        }
    }

    /// Numeric arguments in wire order.
    pub fn arguments(&self) -> Vec<&Argument> {
        match self {
            Command::RapidMove { x, y } => vec![x, y],
            Command::FeedMove { x, y, feed } => vec![x, y, feed],
            _ => Vec::new(),
        }
    }

    /// Lines to transmit, without terminators.
    ///
    /// Commands without arguments are one line. Moves are framed one token
    /// per line: the opcode, then each argument token unchanged.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.opcode().to_string()];
        lines.extend(self.arguments().iter().map(|a| a.as_str().to_string()));
        lines
    }

    /// Newline-terminated ASCII bytes for the device.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for line in self.lines() {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        out
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join(" "))
    }
}

fn parse_arguments<const N: usize>(tokens: &[&str]) -> Option<[Argument; N]> {
    if tokens.len() != N {
        return None;
    }
    let args: Vec<Argument> = tokens
        .iter()
        .map(|t| Argument::parse(t))
        .collect::<Option<_>>()?;
    args.try_into().ok()
}

/// Classify `text` against the command grammar.
///
/// Surrounding whitespace is ignored. Malformed input is returned as a
/// [`GrammarError`] carrying the offending text; this never panics.
pub fn validate(text: &str) -> Result<Command, GrammarError> {
    let reject = || GrammarError::new(text);
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some((&opcode, args)) = tokens.split_first() else {
        return Err(reject());
    };

    let command = match opcode {
        "G90" => Command::SetPositioning(Positioning::Absolute),
        "G91" => Command::SetPositioning(Positioning::Relative),
        "G20" => Command::SetUnits(Units::Inches),
        "G21" => Command::SetUnits(Units::Millimeters),
        "M02" => Command::EndOfProgram,
        "M06" => Command::ToolChange,
        "M72" => Command::RestoreState,
        "G00" => {
            let [x, y] = parse_arguments::<2>(args).ok_or_else(reject)?;
            return Ok(Command::RapidMove { x, y });
        }
        "G01" => {
            let [x, y, feed] = parse_arguments::<3>(args).ok_or_else(reject)?;
            return Ok(Command::FeedMove { x, y, feed });
        }
        _ => return Err(reject()),
    };

    if !args.is_empty() {
        return Err(reject());
    }
    Ok(command)
}

impl FromStr for Command {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}
