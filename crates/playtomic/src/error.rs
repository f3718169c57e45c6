//! Error types for the playtomic library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, session state, HTTP status, and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for playtomic operations.
///
/// Only a single expired-token retry is ever performed internally; every
/// other failure surfaces here unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Login or token refresh failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// An operation was attempted in a session state that does not allow it.
    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    /// The API answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The API answered with a success status but an unreadable body.
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] InvalidResponseError),

    /// Input validation errors (base URL, resource id, payload).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            Error::Auth(AuthError::Rejected { status, .. }) => Some(*status),
            Error::InvalidResponse(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The request could not be sent or its body could not be read.
    #[error("request failed: {message}")]
    Request { message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::ClientBuild {
                message: err.to_string(),
            }
        } else {
            TransportError::Request {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// The token-acquiring call an [`AuthError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    Refresh,
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOperation::Login => f.write_str("login"),
            AuthOperation::Refresh => f.write_str("token refresh"),
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API rejected the login or refresh request.
    #[error("{operation} rejected with HTTP {status}{}", message_suffix(.message))]
    Rejected {
        operation: AuthOperation,
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be parsed.
    #[error("{operation} returned an unparseable body: {reason}")]
    MalformedResponse {
        operation: AuthOperation,
        reason: String,
    },

    /// A success response did not carry one of the tokens.
    #[error("{operation} response is missing '{field}'")]
    MissingToken {
        operation: AuthOperation,
        field: &'static str,
    },

    /// The request never produced a response.
    #[error("{operation} failed: {source}")]
    Transport {
        operation: AuthOperation,
        #[source]
        source: TransportError,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Session state errors.
#[derive(Debug, Error)]
pub enum InvalidStateError {
    /// A token refresh was requested before any successful login.
    #[error("no refresh token available; login has not succeeded yet")]
    NotAuthenticated,
}

/// Maximum length for error response bodies in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// A non-success HTTP status returned by the API.
#[derive(Debug)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Request method.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// Server-provided message or a truncated body, if any.
    pub message: Option<String>,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} for {} {}", self.status, self.method, self.path)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(
        status: u16,
        method: impl Into<String>,
        path: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            status,
            method: method.into(),
            path: path.into(),
            message,
        }
    }

    /// Check if this is an expired or missing token.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Extract a human readable message from an error response body.
///
/// JSON bodies with a `message` or `error` string field yield that field;
/// anything else is returned as text, truncated to avoid logging excessive data.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(truncate_body(text));
            }
        }
    }

    Some(truncate_body(trimmed))
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!(
        "{}... (truncated, {} total bytes)",
        &body[..end],
        body.len()
    )
}

/// A success response whose body is not valid JSON.
#[derive(Debug, Error)]
#[error("HTTP {status} for {path}: {reason}")]
pub struct InvalidResponseError {
    pub status: u16,
    pub path: String,
    pub reason: String,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid resource identifier.
    #[error("invalid resource id '{value}': {reason}")]
    ResourceId { value: String, reason: String },

    /// A request payload could not be serialized to JSON.
    #[error("payload could not be serialized: {reason}")]
    Payload { reason: String },
}
