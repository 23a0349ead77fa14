use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a call to the shop REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 4xx with a reason the server wants shown to the user.
    #[error("{reason}")]
    Rejected { status: StatusCode, reason: String },

    /// Any other non-2xx response.
    #[error("API error: {status} - {message}")]
    Server { status: StatusCode, message: String },

    #[error("Failed to parse JSON: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response by its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = error_detail(body);
        if status.is_client_error() {
            if let Some(reason) = detail {
                return Self::Rejected { status, reason };
            }
        }
        Self::Server {
            status,
            message: detail.unwrap_or_default(),
        }
    }

    /// Text for an on-page notice. Server-provided reasons win over `fallback`.
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { reason, .. } => reason.clone(),
            Self::Server { message, .. } if !message.is_empty() => {
                format!("{fallback}: {message}")
            }
            _ => fallback.to_string(),
        }
    }
}

/// Human-readable detail from an error body: a bare JSON string, the
/// `message`/`error`/`detail` field of a JSON object, or the plain text.
pub fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let detail = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => Some(text),
        Ok(Value::Object(map)) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    };
    detail.filter(|text| !text.trim().is_empty())
}
