// SPDX-FileCopyrightText: 2026 Mem0 Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mem0 client.

use thiserror::Error;

/// The single error type surfaced by every client operation.
#[derive(Debug, Error)]
pub enum Mem0Error {
    /// Invalid or missing client configuration (API key, org/project pairing,
    /// base URL, header values). Raised before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// A caller-supplied value failed client-side validation. Raised before any I/O.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested API generation is not supported by the operation.
    #[error("unsupported API version: {0:?}")]
    UnsupportedVersion(String),

    /// A cascading entity delete resolved to an empty target set.
    #[error("no entities to delete")]
    NoEntitiesToDelete,

    /// The server answered with a non-2xx status.
    #[error("API request failed: {status} {reason}: {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    /// The caller cancelled the in-flight request.
    #[error("request cancelled")]
    Cancelled,

    /// The request exceeded the client's overall timeout.
    #[error("request timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Connection-level failure before a response was received.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An outbound value (request parameters, body or printed output) could
    /// not be serialized to JSON. Raised before any I/O.
    #[error("encode error: {message}")]
    Encode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A 2xx response body did not match the declared result type.
    #[error("decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Mem0Error {
    /// True for configuration problems the caller must fix before retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// True for client-side validation failures (no request was sent).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::UnsupportedVersion(_) | Self::NoEntitiesToDelete
        )
    }

    /// True when the caller aborted the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// `?` on `serde_json` is only used for outbound data; response bodies are
/// mapped to [`Mem0Error::Decode`] explicitly.
impl From<serde_json::Error> for Mem0Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
