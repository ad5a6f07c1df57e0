// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outbound body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Inbound body of a successful `POST /chat`. Every field is optional on
/// the wire; defaults are applied when the reply becomes a bubble.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    pub response: Option<String>,
    pub intent: Option<String>,
    pub confidence: Option<f64>,
}

/// Logs details of each backend call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
