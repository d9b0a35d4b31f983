// Runtime configuration shared with the application and HTTP layers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub page_size: u64,
    pub max_body_bytes: u64,
    pub session_secure: bool,
    pub session_idle_minutes: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            page_size: 100,
            max_body_bytes: 32 * 1024 * 1024,
            session_secure: false,
            session_idle_minutes: 24 * 60,
        }
    }
}
