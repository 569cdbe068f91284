//! Search configuration
//!
//! Work buffer size and difficulty, loaded from an optional JSON file,
//! a named preset and command-line overrides (in that order).

use mempow_core::{DEFAULT_DIFFICULTY, DEFAULT_WORK_BUFFER_SIZE, MemoryPoW};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MIB: usize = 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] mempow_core::Error),
}

/// Operating points for the network message types that carry a nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Chat from an account without balance
    Chat,
    /// Chat from an account with balance
    ChatFunded,
    /// Direct message
    Message,
    /// Presence announcement
    Presence,
    /// Account publicize
    Publicize,
    /// Peer handshake
    Handshake,
    /// Peer handshake with peers on older versions
    HandshakeLegacy,
}

impl Preset {
    /// (work buffer bytes, difficulty)
    pub const fn params(self) -> (usize, u32) {
        match self {
            Preset::Chat => (8 * MIB, 14),
            Preset::ChatFunded => (8 * MIB, 8),
            Preset::Message => (8 * MIB, 14),
            Preset::Presence => (8 * MIB, 8),
            Preset::Publicize => (8 * MIB, 15),
            Preset::Handshake => (2 * MIB, 2),
            Preset::HandshakeLegacy => (8 * MIB, 8),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowConfig {
    /// Work buffer size in bytes (positive multiple of 8)
    pub work_buffer_size: usize,
    /// Required leading zero bits
    pub difficulty: u32,
}

impl Default for PowConfig {
    fn default() -> Self {
        Self {
            work_buffer_size: DEFAULT_WORK_BUFFER_SIZE,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

impl PowConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_preset(preset: Preset) -> Self {
        let (work_buffer_size, difficulty) = preset.params();
        Self {
            work_buffer_size,
            difficulty,
        }
    }

    /// Replace fields with any values given explicitly
    pub fn with_overrides(
        mut self,
        work_buffer_size: Option<usize>,
        difficulty: Option<u32>,
    ) -> Self {
        if let Some(size) = work_buffer_size {
            self.work_buffer_size = size;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        mempow_core::validate_buffer_size(self.work_buffer_size)?;
        mempow_core::validate_difficulty(self.difficulty)?;
        Ok(())
    }

    /// Validate and allocate a solver for this configuration
    pub fn solver(&self) -> Result<MemoryPoW, ConfigError> {
        self.validate()?;
        Ok(MemoryPoW::with_buffer_size(self.work_buffer_size)?)
    }
}
