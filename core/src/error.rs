//! Error types for the Pakk API client.
//!
//! # Design
//! Every failure is surfaced to the immediate caller; nothing is retried or
//! recovered locally. Timeouts land in `Transport` together with DNS, TLS and
//! connection failures. Non-2xx responses land in `Http` with the raw status
//! code and body so the diagnostic text the server sent is not lost.

use thiserror::Error;

/// Errors returned by `PakkClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request could not be constructed (bad URI, header or body).
    #[error("invalid request: {0}")]
    Request(String),

    /// The request never produced a response: connect, TLS, I/O or timeout.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("received non-OK response from Pakk: HTTP {}: {body}", status_line(.status))]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the target value.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The HTTP status carried by an `Http` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Raised when a string is not a valid 24-character hex object id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    #[error("object id must be 24 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("object id contains non-hex character {0:?}")]
    InvalidCharacter(char),
}

fn status_line(status: &u16) -> String {
    let reason = ureq::http::StatusCode::from_u16(*status)
        .ok()
        .and_then(|code| code.canonical_reason());
    match reason {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status_line_and_body() {
        let err = ApiError::Http {
            status: 422,
            body: "validation failed".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("422 Unprocessable Entity"), "{message}");
        assert!(message.contains("validation failed"), "{message}");
    }

    #[test]
    fn unknown_status_renders_bare_code() {
        let err = ApiError::Http {
            status: 599,
            body: String::new(),
        };
        assert!(err.to_string().contains("HTTP 599:"));
    }

    #[test]
    fn status_only_for_http_errors() {
        let err = ApiError::Http {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Transport("timed out".into()).status(), None);
    }
}
