//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Before sending         On the wire              From the server        │
//! │  ──────────────         ───────────              ───────────────        │
//! │  InvalidForm            Timeout                  Api {status, code}     │
//! │                         Connection               Status (no JSON body)  │
//! │                         Decode                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Display` is the failure string the app shows to the user.

use serde::Deserialize;
use shop_core::FormReport;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The registration form failed local validation; nothing was sent.
    #[error("Registration form is invalid: {}", summarize(.0))]
    InvalidForm(FormReport),

    /// Connect or request timeout elapsed.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Could not reach the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Response body was not what the endpoint promises.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The server answered with its `{code, message}` error body.
    #[error("{message} ({code}, HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Non-success status without a readable error body.
    #[error("Server returned HTTP {0}")]
    Status(u16),
}

impl ClientError {
    /// HTTP status of a server-side failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Status(status) => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}

/// Server error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: String,
    pub message: String,
}

fn summarize(report: &FormReport) -> String {
    report
        .errors()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
