// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.
//!
//! Resource operations never catch these; they propagate to the calling
//! screen, which decides how to present them.

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Error type returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Token refresh failed: {0}")]
    RefreshFailed(RefreshError),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Invalid access token: {0}")]
    Decode(#[from] TokenDecodeError),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Session has been disposed")]
    SessionClosed,

    #[error("Screen dismissed before the request completed")]
    Dismissed,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Build the error for a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST => match FieldErrors::from_body(&body) {
                Some(fields) => ClientError::Validation(fields),
                None => ClientError::Api {
                    status: status.as_u16(),
                    body,
                },
            },
            _ => ClientError::Api {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Map a transport failure from reqwest.
    pub fn network(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Network(format!("request timed out: {}", err))
        } else {
            ClientError::Network(err.to_string())
        }
    }

    /// Whether this error means the session is no longer usable.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized
                | ClientError::RefreshFailed(_)
                | ClientError::InvalidCredentials
                | ClientError::Decode(_)
                | ClientError::SessionClosed
        )
    }

    /// Short message suitable for inline display.
    ///
    /// Validation errors show the first field error the server reported.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::InvalidCredentials => "Invalid credentials".to_string(),
            ClientError::Validation(fields) => fields
                .first_message()
                .unwrap_or("Request failed. Please try again.")
                .to_string(),
            ClientError::PasswordMismatch => "Passwords do not match".to_string(),
            ClientError::Unauthorized
            | ClientError::RefreshFailed(_)
            | ClientError::Decode(_)
            | ClientError::SessionClosed => "Your session has expired. Please log in again.".to_string(),
            ClientError::NotFound(_) => "Not found".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Rejected or failed `auth/refresh/` exchange.
///
/// Cloned to every call that was waiting on the same refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshError {
    /// HTTP status of the refresh response; `None` if no response arrived
    pub status: Option<u16>,
    /// Server `detail` message, or the transport error
    pub detail: String,
}

impl RefreshError {
    /// Build from a non-success refresh response body.
    ///
    /// Uses the `detail` field when the body carries one.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| match body.trim() {
                "" => status.canonical_reason().unwrap_or("no response body").to_string(),
                text => text.to_string(),
            });

        Self {
            status: Some(status.as_u16()),
            detail,
        }
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.detail),
            None => f.write_str(&self.detail),
        }
    }
}

impl std::error::Error for RefreshError {}

/// Why a locally stored access token could not be trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("invalid claims: {0}")]
    InvalidClaims(String),

    #[error("token expired at {0}")]
    Expired(i64),
}

/// Field errors reported by the server for a rejected create/update, in the
/// order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    /// Parse a `{"field": ["message", ...]}` body.
    ///
    /// Returns `None` if the body is not a JSON object with at least one entry.
    pub fn from_body(body: &str) -> Option<Self> {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return None;
        };

        let mut errors = FieldErrors::default();
        for (field, value) in map {
            let messages = match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
                Value::String(s) => vec![s],
                other => vec![other.to_string()],
            };
            errors.push(field, messages);
        }

        (!errors.is_empty()).then_some(errors)
    }

    pub fn push(&mut self, field: impl Into<String>, messages: Vec<String>) {
        self.fields.push((field.into(), messages));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field, if the server reported any.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, messages)| messages.as_slice())
    }

    /// First available message across all fields.
    pub fn first_message(&self) -> Option<&str> {
        self.fields
            .iter()
            .flat_map(|(_, messages)| messages.iter())
            .map(String::as_str)
            .next()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
