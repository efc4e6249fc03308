//! Caller-owned user preferences consumed by core flows.
//!
//! The preference storage itself lives in the app shell; core only reads
//! these values at commit time and when building outbound payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User preferences relevant to core behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether the daily reminder has been configured.
    pub reminder_enabled: bool,
    /// Whether behavioral analytics may be sent.
    pub analytics_enabled: bool,
    /// Anonymous per-install id attached to outbound payloads.
    pub device_id: String,
}

impl Settings {
    /// Creates default settings with a fresh anonymous device id.
    pub fn new() -> Self {
        Self {
            reminder_enabled: false,
            analytics_enabled: true,
            device_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
