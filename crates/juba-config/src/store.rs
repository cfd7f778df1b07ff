use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    Json,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "json" | "file" => Ok(StoreBackend::Json),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::Json => f.write_str("json"),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("dictionary.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// File used by the json backend
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

impl StoreConfig {
    pub fn new() -> Self {
        let backend = env::var("JUBA_STORE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let data_path = env::var("JUBA_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        Self { backend, data_path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_path: default_data_path(),
        }
    }
}
