use std::env;

use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::store::StoreConfig;

pub mod network;
pub mod store;

pub use self::store::StoreBackend;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub store: StoreConfig,

    /// Upper bound for a single API request, store access included
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        let request_timeout_ms = env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000); // 5 seconds default

        Config {
            network: NetworkConfig::new(),
            store: StoreConfig::new(),

            request_timeout_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
