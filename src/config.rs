//! This module provides `MachineConfig`, the flat configuration snapshot of a
//! Turing Machine session: every definition field plus the step limit and the
//! initial input, all as strings, serialized as JSON (`.tmc` files).

use crate::definition::MachineDefinition;
use crate::types::{TuringMachineError, DEFAULT_BLANK_SYMBOL, DEFAULT_STEP_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete machine session as a flat key-value record.
///
/// All eight fields are strings, matching what a front-end would collect from
/// its input fields: `states` is space-separated, `tape_alphabet`
/// comma-separated, `halting_states` space-separated, `rules` newline-separated
/// rule text, and `step_limit` a decimal string (falling back to 1000 when it
/// does not parse). Missing fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub states: String,
    pub tape_alphabet: String,
    pub initial_state: String,
    pub blank_symbol: String,
    pub halting_states: String,
    pub step_limit: String,
    pub rules: String,
    pub input: String,
}

impl MachineConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, TuringMachineError> {
        serde_json::from_str(content)
            .map_err(|e| TuringMachineError::ConfigError(format!("Invalid configuration: {e}")))
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), TuringMachineError> {
        fs::write(path, self.to_json()?).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to write file {}: {}", path.display(), e))
        })
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TuringMachineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TuringMachineError::ConfigError(e.to_string()))
    }

    /// Returns the step limit, defaulting to 1000 when the field does not
    /// parse as a non-negative integer.
    pub fn step_limit_value(&self) -> usize {
        self.step_limit.trim().parse().unwrap_or(DEFAULT_STEP_LIMIT)
    }

    /// Returns the blank symbol: the first character of `blank_symbol`, or the
    /// default `_` when the field is empty.
    pub fn blank(&self) -> char {
        self.blank_symbol
            .trim()
            .chars()
            .next()
            .unwrap_or(DEFAULT_BLANK_SYMBOL)
    }

    /// Builds the machine definition described by this configuration, with
    /// rules loaded but without validating. Callers that want to surface
    /// warnings alongside errors run [`MachineDefinition::validate`] themselves.
    pub fn definition(&self) -> Result<MachineDefinition, TuringMachineError> {
        let mut definition = MachineDefinition::define(
            &self.states,
            &self.tape_alphabet,
            &self.initial_state,
            self.blank(),
        );
        definition.load_rules(&self.rules, &self.halting_states)?;
        Ok(definition)
    }

    /// Builds and validates the machine definition.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` when validation finds no errors (warnings are
    ///   discarded here).
    /// * `Err(TuringMachineError::InvalidDefinition)` carrying every collected
    ///   validation error otherwise.
    pub fn build(&self) -> Result<MachineDefinition, TuringMachineError> {
        let definition = self.definition()?;
        let validation = definition.validate();
        if !validation.is_valid() {
            return Err(TuringMachineError::InvalidDefinition(validation.errors));
        }
        Ok(definition)
    }
}
