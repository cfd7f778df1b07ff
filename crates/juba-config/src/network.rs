use std::env;

use serde::{Deserialize, Serialize};

fn default_addr() -> String {
    "127.0.0.1:5000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Socket address the WebSocket API listens on
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let addr = env::var("JUBA_ADDR").unwrap_or_else(|_| default_addr());

        Self { addr }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}
