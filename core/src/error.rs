//! Error types for the PetClub API clients.
//!
//! # Design
//! `NotFound` and `DuplicateName` get dedicated variants because screens
//! react to them differently from a generic failure: a pet delete answered
//! with 404 is a no-op, and a duplicate tutor name is mapped back onto the
//! `name` field. Every other non-2xx response lands in `Http` with the status
//! and whatever message the server sent.

use serde::Deserialize;

use crate::http::{HttpResponse, TransportError};
use crate::mapper::InvalidDate;

/// Message the backend puts in a 400 body when a tutor name is already taken.
pub const DUPLICATE_TUTOR_NAME: &str = "Já existe um tutor com esse nome";

/// Errors returned by the resource clients' `parse_*` and `build_*` methods.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// No response was received at all.
    #[error("network unreachable: {0}")]
    Network(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected a create/update because the name is taken.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// Any other non-2xx status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Http { status: u16, message: Option<String> },

    /// The backend sent a species code with no frontend counterpart.
    #[error("unknown species {0:?}")]
    UnknownSpecies(String),

    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(response: &HttpResponse) -> Self {
        let message = server_message(&response.body);
        match response.status {
            404 => ApiError::NotFound,
            409 => ApiError::DuplicateName(message.unwrap_or_default()),
            400 if response.body.contains(DUPLICATE_TUTOR_NAME) => {
                ApiError::DuplicateName(message.unwrap_or_else(|| DUPLICATE_TUTOR_NAME.to_string()))
            }
            status => ApiError::Http { status, message },
        }
    }

    /// Text suitable for a notification. Server messages are shown verbatim;
    /// everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::DuplicateName(_) => {
                "A tutor with this name already exists. Please use a different name.".to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.0)
    }
}

/// Pull a human-readable message out of an error body: the `message` field of
/// a JSON object, or the body itself when it is plain text.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        return serde_json::from_str::<ServerMessage>(trimmed)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.is_empty());
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_message_is_preserved() {
        let err = ApiError::from_response(&HttpResponse::new(500, r#"{"message":"boom"}"#));
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: Some("boom".to_string())
            }
        );
        assert_eq!(err.user_message("fallback"), "boom");
    }

    #[test]
    fn plain_text_body_becomes_message() {
        let err = ApiError::from_response(&HttpResponse::new(422, "weight must be positive"));
        assert_eq!(err.user_message("fallback"), "weight must be positive");
    }

    #[test]
    fn empty_body_uses_fallback() {
        let err = ApiError::from_response(&HttpResponse::new(500, ""));
        assert!(matches!(err, ApiError::Http { status: 500, message: None }));
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn json_without_message_uses_fallback() {
        let err = ApiError::from_response(&HttpResponse::new(500, r#"{"error":"x"}"#));
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn duplicate_tutor_name_is_detected() {
        let err = ApiError::from_response(&HttpResponse::new(400, DUPLICATE_TUTOR_NAME));
        assert!(matches!(err, ApiError::DuplicateName(_)));
    }

    #[test]
    fn other_bad_request_stays_http() {
        let err = ApiError::from_response(&HttpResponse::new(400, "bad"));
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
    }

    #[test]
    fn not_found_has_its_own_variant() {
        let err = ApiError::from_response(&HttpResponse::new(404, "missing"));
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn transport_error_is_network() {
        let err: ApiError = TransportError("connection refused".to_string()).into();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(err.user_message("fallback").contains("connection"));
    }
}
