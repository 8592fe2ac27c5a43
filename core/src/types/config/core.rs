use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How the delivery store guards its read-modify-write cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// No lock. Concurrent mutations on a shared store are last-write-wins
    /// and may drop each other's appends.
    #[default]
    Unguarded,
    /// Every mutation holds a store-wide lock across read, modify and write.
    Serialized,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Unguarded => write!(f, "unguarded"),
            WriteMode::Serialized => write!(f, "serialized"),
        }
    }
}

/// Core configuration for RecyclafyCore initialization.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
    pub write_mode: WriteMode,
}

impl Config {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_mode: WriteMode::default(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("recyclafy.redb")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_path.join("config.toml")
    }
}
