//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including rule representation, head moves, execution outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The boundary marker written at tape position 0 when input is loaded.
pub const BOUNDARY_SYMBOL: char = '⊳';
/// A special input symbol used in machine definitions to represent the blank symbol.
pub const INPUT_BLANK_SYMBOL: char = '_';
/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The default number of steps executed before the caller is asked to continue.
pub const DEFAULT_STEP_LIMIT: usize = 1000;

/// A single transition rule: what to write, how to move, and which state to enter.
///
/// Rules are stored per `(state, read-symbol)` key in definition order. When
/// several rules share a key, only the first is ever applied (first-match
/// policy); the alternatives are kept but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The symbol written at the head position before moving.
    pub write: char,
    /// The head move, or one of the halting pseudo-moves `Y`/`N`.
    pub mv: Move,
    /// The state the machine transitions to.
    pub next_state: String,
}

/// Represents the possible head moves of a transition rule.
///
/// `Accept` and `Reject` are halting pseudo-moves: the head does not move and
/// the machine halts with the corresponding verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Halt and accept (`Y`).
    Accept,
    /// Halt and reject (`N`).
    Reject,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Accept => 'Y',
            Move::Reject => 'N',
        };
        write!(f, "{c}")
    }
}

impl std::str::FromStr for Move {
    type Err = TuringMachineError;

    /// Parses a move token, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(Move::Left),
            "R" => Ok(Move::Right),
            "Y" => Ok(Move::Accept),
            "N" => Ok(Move::Reject),
            _ => Err(TuringMachineError::UnsupportedMove(s.to_string())),
        }
    }
}

/// The terminal verdict of an execution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No verdict yet, or halted in a halting state without an explicit `Y`/`N`.
    #[default]
    Unset,
    /// Halted via an `Y` rule.
    Accept,
    /// Halted via an `N` rule.
    Reject,
    /// Halted because no rule matched and the final state was not a halting state.
    RejectNoTransition,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Unset => "Halted",
            Outcome::Accept => "Accepted",
            Outcome::Reject => "Rejected",
            Outcome::RejectNoTransition => "Rejected (no transition)",
        };
        write!(f, "{s}")
    }
}

/// The lifecycle state of the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// No input loaded since construction or the last reset.
    Ready,
    /// Input loaded, machine not yet halted.
    Running,
    /// Machine halted.
    Halted,
}

/// A recorded configuration: state, rendered tape span, and head position.
///
/// One snapshot is pushed when input is loaded (the setup configuration) and
/// one per executed step (the pre-transition configuration), so the snapshot
/// sequence is one longer than the transition log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The state the machine was in.
    pub state: String,
    /// The occupied tape span rendered as a string.
    pub tape: String,
    /// The head position at the time of the snapshot.
    pub head: i64,
}

/// How rule text parsing treats lines that do not form a valid rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Malformed lines are silently skipped (blank and comment lines always are).
    #[default]
    Lenient,
    /// Malformed lines abort rule loading with an error.
    Strict,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// The machine definition failed validation; carries every collected error.
    #[error("Invalid machine definition: {}", .0.join("; "))]
    InvalidDefinition(Vec<String>),
    /// The input string contains characters outside the tape alphabet.
    #[error("Input contains symbols outside the tape alphabet: {}", format_symbols(.0))]
    InvalidInputSymbols(Vec<char>),
    /// A rule line did not tokenize into five valid fields (strict mode only).
    #[error("Malformed rule on line {line}: {text}")]
    MalformedRule { line: usize, text: String },
    /// A move token was not one of `L`, `R`, `Y`, `N`.
    #[error("Unsupported move: {0}")]
    UnsupportedMove(String),
    /// Indicates an error while reading or writing a configuration snapshot.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}

/// Formats a list of symbols into a human-readable string for error messages.
pub(crate) fn format_symbols(symbols: &[char]) -> String {
    symbols
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
