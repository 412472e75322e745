//! This crate provides the core logic for a deterministic single-tape Turing
//! Machine simulator: the machine definition model (states, tape alphabet,
//! transition rules, validation), the execution engine (sparse tape, head
//! movement, halting detection, history recording), the flat configuration
//! snapshot format, and a registry of built-in sample machines.

pub mod config;
pub mod definition;
pub mod machine;
pub mod samples;
pub mod types;

/// Re-exports the `MachineConfig` struct from the config module.
pub use config::MachineConfig;
/// Re-exports the definition model from the definition module.
pub use definition::{MachineDefinition, RuleKey, Validation};
/// Re-exports the `TuringMachine` execution engine from the machine module.
pub use machine::TuringMachine;
/// Re-exports the sample registry from the samples module.
pub use samples::{SampleManager, SAMPLES};
/// Re-exports the core types used for machine definition and execution.
pub use types::{
    Move, Outcome, ParseMode, Rule, Snapshot, Status, TuringMachineError, BOUNDARY_SYMBOL,
    DEFAULT_BLANK_SYMBOL, DEFAULT_STEP_LIMIT, INPUT_BLANK_SYMBOL,
};
