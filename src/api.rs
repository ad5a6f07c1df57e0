use crate::errors::ApiError;
use crate::logging::log_api_call;
use crate::models::{ApiCallLog, ChatRequest, ChatResponse};
use chrono::Utc;
use log::debug;
use reqwest::Client;
use std::time::Instant;

// Constants for the backend contract
pub const CHAT_ENDPOINT: &str = "/chat";
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't process that.";
pub const UNKNOWN_INTENT: &str = "unknown";

/// A backend reply with metadata defaults already applied.
#[derive(Debug, Clone)]
pub struct BotReply {
    pub text: String,
    pub intent: String,
    pub confidence: f64,
}

/// Thin client for the `POST /chat` contract. One request per send, no
/// retries, no request timeout; a hung call resolves when the transport
/// does.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Posts one user message and maps the outcome:
    /// 2xx JSON body with `response` -> reply text, 2xx without a usable
    /// body -> fixed fallback text, non-2xx -> `ApiError::Server`,
    /// transport failure -> `ApiError::Network`.
    pub async fn send_message(&self, text: &str) -> Result<BotReply, ApiError> {
        let url = format!("{}{}", self.base_url, CHAT_ENDPOINT);
        let body = ChatRequest {
            message: text.to_string(),
        };

        let started = Instant::now();
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: url,
            request_summary: summarize(text),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }

        // A 2xx body that is not valid JSON degrades to the fallback reply,
        // same as a body with no `response` field.
        let parsed: ChatResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("unparseable reply body: {}", e);
                ChatResponse::default()
            }
        };

        Ok(BotReply {
            text: parsed.response.unwrap_or_else(|| FALLBACK_REPLY.to_string()),
            intent: parsed.intent.unwrap_or_else(|| UNKNOWN_INTENT.to_string()),
            confidence: parsed.confidence.unwrap_or(0.0),
        })
    }
}

/// Short request description for the api call audit log.
fn summarize(text: &str) -> String {
    if text.chars().count() > 120 {
        let prefix: String = text.chars().take(120).collect();
        format!("{}...", prefix)
    } else {
        text.to_string()
    }
}
