//! Response types for the tooldex API

use serde::{Deserialize, Serialize};

/// Successful chat response: the extracted model text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Analytics acknowledgement — always `{ ok: true }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsAck {
    pub ok: bool,
}

impl AnalyticsAck {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
