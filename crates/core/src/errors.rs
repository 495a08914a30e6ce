use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Remote error: {}", extract_message(.body).unwrap_or_else(|| "unknown error".to_string()))]
    Remote { status: Option<u16>, body: Value },

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SchoolResult<T> = Result<T, SchoolError>;

impl SchoolError {
    /// Human-readable message for a notification, falling back to
    /// `fallback` when the error carries nothing worth showing.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = match self {
            SchoolError::NotFound(msg)
            | SchoolError::Validation(msg)
            | SchoolError::Conflict(msg)
            | SchoolError::Rejected(msg) => Some(msg.clone()),
            SchoolError::Remote { body, .. } => extract_message(body),
            SchoolError::Database(_) | SchoolError::Internal(_) => None,
        };

        message
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Pulls a message out of an error body of unknown shape.
///
/// Lookup order: `response.data.message`, `response.data.details`,
/// `message`, `details`, `error`. Non-string values are skipped, except
/// that a `details` array is joined with `"; "`.
pub fn extract_message(body: &Value) -> Option<String> {
    const POINTERS: [&str; 5] = [
        "/response/data/message",
        "/response/data/details",
        "/message",
        "/details",
        "/error",
    ];

    POINTERS
        .iter()
        .filter_map(|pointer| body.pointer(pointer))
        .find_map(message_from_value)
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(message_from_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
