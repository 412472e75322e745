//! Built-in sample machine configurations, embedded at compile time and parsed
//! lazily into a shared registry.

use crate::config::MachineConfig;
use crate::types::TuringMachineError;
use std::sync::RwLock;

// Default embedded machines
const SAMPLE_TEXTS: [(&str, &str); 3] = [
    ("even-a", include_str!("../machines/even-a.tmc")),
    ("flip-ab", include_str!("../machines/flip-ab.tmc")),
    ("contains-b", include_str!("../machines/contains-b.tmc")),
];

lazy_static::lazy_static! {
    pub static ref SAMPLES: RwLock<Vec<(String, MachineConfig)>> = RwLock::new(Vec::new());
}

pub struct SampleManager;

impl SampleManager {
    /// Parse the embedded sample configurations into the registry.
    pub fn load() -> Result<(), TuringMachineError> {
        let mut samples = Vec::new();

        for (name, text) in SAMPLE_TEXTS {
            match MachineConfig::from_json(text) {
                Ok(config) => samples.push((name.to_string(), config)),
                Err(e) => eprintln!("Failed to parse sample '{name}': {e}"),
            }
        }

        if let Ok(mut write_guard) = SAMPLES.write() {
            *write_guard = samples;
        } else {
            return Err(TuringMachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available samples
    pub fn count() -> usize {
        let _ = Self::load();

        SAMPLES.read().map(|samples| samples.len()).unwrap_or(0)
    }

    /// Get the names of all available samples
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        SAMPLES
            .read()
            .map(|samples| samples.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Get a sample configuration by its index
    pub fn by_index(index: usize) -> Result<MachineConfig, TuringMachineError> {
        let _ = Self::load();

        SAMPLES
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .map(|(_, config)| config.clone())
            .ok_or_else(|| {
                TuringMachineError::ConfigError(format!("Sample index {index} out of range"))
            })
    }

    /// Get a sample configuration by its name
    pub fn by_name(name: &str) -> Result<MachineConfig, TuringMachineError> {
        let _ = Self::load();

        SAMPLES
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|(sample_name, _)| sample_name == name)
            .map(|(_, config)| config.clone())
            .ok_or_else(|| TuringMachineError::ConfigError(format!("Unknown sample: {name}")))
    }
}
