//! Error types for the upload module.
//!
//! Every failure `TfLinkClient` can report is one of the variants below,
//! each tagged with a finite kind so callers can match exhaustively and
//! carrying a message that is safe to show to a user.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use super::constants::MIB;

/// Why a local file could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccessKind {
    /// Path is missing or is not a regular file.
    NotFound,
    /// The OS refused to open or read the file.
    ReadFailed,
}

/// Why an upload was rejected or could not be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFailure {
    /// File exceeds the client limit, or the server answered 413.
    TooLarge,
    /// Server answered with a 5xx status.
    ServerError,
    /// Any other non-success status.
    Rejected,
    /// Success status but the payload was not a usable result.
    InvalidResponse,
}

/// Why the server refused the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
}

/// Transport failure before any HTTP response was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailure {
    Timeout,
    ConnectionFailed,
    RequestFailed,
}

/// Errors returned by client construction and uploads.
#[derive(Debug, Error)]
pub enum TfLinkError {
    /// The client was constructed with invalid settings.
    #[error("{message}")]
    Configuration {
        /// Human-readable description.
        message: String,
    },

    /// The local file is missing, not a regular file, or unreadable.
    #[error("{message}")]
    FileAccess {
        /// Failure kind.
        kind: FileAccessKind,
        /// Human-readable description.
        message: String,
        /// The underlying IO error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The upload was rejected (client- or server-side) or the reply was unusable.
    #[error("{message}")]
    Upload {
        /// Failure kind.
        kind: UploadFailure,
        /// Human-readable description.
        message: String,
    },

    /// The server rejected the credentials.
    #[error("{message}")]
    Authentication {
        /// Failure kind.
        kind: AuthFailure,
        /// Human-readable description.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("{message}")]
    Network {
        /// Failure kind.
        kind: NetworkFailure,
        /// Human-readable description.
        message: String,
        /// The underlying transport error.
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl TfLinkError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates the error for a user id without token (or vice versa).
    #[must_use]
    pub fn partial_credentials() -> Self {
        Self::configuration(
            "Both user_id and auth_token must be provided for authenticated uploads",
        )
    }

    /// Creates a not-found error for a path that does not exist.
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileAccess {
            kind: FileAccessKind::NotFound,
            message: format!("File not found: {}", path.display()),
            source: None,
        }
    }

    /// Creates a not-found error for a path that exists but is not a regular file.
    ///
    /// Reported with the same kind as a missing path.
    pub fn not_a_file(path: &Path) -> Self {
        Self::FileAccess {
            kind: FileAccessKind::NotFound,
            message: format!("Path is not a file: {}", path.display()),
            source: None,
        }
    }

    /// Creates a read failure from an IO error.
    #[must_use]
    pub fn read_failed(source: std::io::Error) -> Self {
        Self::FileAccess {
            kind: FileAccessKind::ReadFailed,
            message: format!("Failed to read file: {source}"),
            source: Some(source),
        }
    }

    /// Creates the client-side size pre-check error.
    ///
    /// The size is reported in MiB with two decimals, the limit in whole MiB.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn file_too_large(size_bytes: u64, limit_bytes: u64) -> Self {
        let size_mib = size_bytes as f64 / MIB as f64;
        Self::Upload {
            kind: UploadFailure::TooLarge,
            message: format!(
                "File too large: {size_mib:.2}MB exceeds maximum allowed size of {}MB",
                limit_bytes / MIB
            ),
        }
    }

    /// Creates the error for an HTTP 413 answer.
    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::Upload {
            kind: UploadFailure::TooLarge,
            message: "File too large. Please check the file size limits.".to_string(),
        }
    }

    /// Creates the error for a 5xx answer.
    #[must_use]
    pub fn server_error(status: u16) -> Self {
        Self::Upload {
            kind: UploadFailure::ServerError,
            message: format!("Server error ({status}). Please try again later."),
        }
    }

    /// Creates the error for any other non-success answer.
    pub fn rejected(status: u16, detail: impl fmt::Display) -> Self {
        Self::Upload {
            kind: UploadFailure::Rejected,
            message: format!("Upload failed with status {status}: {detail}"),
        }
    }

    /// Creates an invalid-response error with a free-form message.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::Upload {
            kind: UploadFailure::InvalidResponse,
            message: message.into(),
        }
    }

    /// Creates the error for a success payload lacking required keys.
    #[must_use]
    pub fn missing_fields(missing: &[&str]) -> Self {
        Self::invalid_response(format!(
            "Invalid response structure. Missing fields: {}",
            missing.join(", ")
        ))
    }

    /// Creates an authentication error for the given kind.
    #[must_use]
    pub fn authentication(kind: AuthFailure) -> Self {
        let message = match kind {
            AuthFailure::Unauthorized => {
                "Authentication failed. Please check your user_id and auth_token."
            }
            AuthFailure::Forbidden => "Access forbidden. Please check your credentials.",
        };
        Self::Authentication {
            kind,
            message: message.to_string(),
        }
    }

    /// Creates a timeout error naming the configured timeout.
    #[must_use]
    pub fn timeout(timeout_secs: u64, source: Option<reqwest::Error>) -> Self {
        Self::Network {
            kind: NetworkFailure::Timeout,
            message: format!("Upload timeout after {timeout_secs} seconds"),
            source,
        }
    }

    /// Creates a connection-level failure.
    #[must_use]
    pub fn connection_failed(source: reqwest::Error) -> Self {
        Self::Network {
            kind: NetworkFailure::ConnectionFailed,
            message: format!("Connection error: {source}"),
            source: Some(source),
        }
    }

    /// Creates a generic transport failure.
    #[must_use]
    pub fn request_failed(source: reqwest::Error) -> Self {
        Self::Network {
            kind: NetworkFailure::RequestFailed,
            message: format!("Request failed: {source}"),
            source: Some(source),
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: the kind depends on where
// the error surfaced, so call sites pick the constructor.
