//! Upload result type and response classification.
//!
//! Classification is a pure function of the HTTP status and the body text so
//! it can be tested without a server. Status codes are checked first, in a
//! fixed priority order; only a 2xx body is parsed as a result.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constants::REQUIRED_RESPONSE_KEYS;
use super::error::{AuthFailure, TfLinkError};

const PUBLIC_DESTINATION: &str = "public";
const USER_DESTINATION_PREFIX: &str = "user: ";

/// A successfully uploaded file, as reported by the server.
///
/// `download_link` and `download_link_encoded` name the same file. The first
/// keeps `/` in the path and reads well; the second has them escaped as `%2F`.
/// Both are copied from the response verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// File name as stored by the server.
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Human-readable download URL.
    #[serde(rename = "downloadLink")]
    pub download_link: String,
    /// Percent-encoded download URL.
    #[serde(rename = "downloadLinkEncoded")]
    pub download_link_encoded: String,
    /// Size in bytes.
    #[serde(rename = "size")]
    pub size_bytes: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub file_type: String,
    /// `"public"` or `"user: <user_id>"`.
    #[serde(rename = "uploadedTo")]
    pub uploaded_to: String,
}

impl UploadResult {
    /// Whether the file went to the public area.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.uploaded_to == PUBLIC_DESTINATION
    }

    /// The owning user id for authenticated uploads.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.uploaded_to.strip_prefix(USER_DESTINATION_PREFIX)
    }
}

impl fmt::Display for UploadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.file_name, self.download_link)
    }
}

/// Maps an HTTP status and body to a result or a typed error.
///
/// First match wins: 401, 403, 413, 5xx, any other non-2xx, then the body
/// is parsed.
pub(crate) fn classify_response(status: u16, body: &str) -> Result<UploadResult, TfLinkError> {
    match status {
        401 => Err(TfLinkError::authentication(AuthFailure::Unauthorized)),
        403 => Err(TfLinkError::authentication(AuthFailure::Forbidden)),
        413 => Err(TfLinkError::payload_too_large()),
        s if s >= 500 => Err(TfLinkError::server_error(s)),
        s if !(200..300).contains(&s) => Err(TfLinkError::rejected(s, rejection_detail(body))),
        _ => parse_success_body(body),
    }
}

/// Server-supplied `error` field when the body is a JSON object carrying one,
/// otherwise the raw body.
fn rejection_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("error") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

fn parse_success_body(body: &str) -> Result<UploadResult, TfLinkError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TfLinkError::invalid_response(format!("Failed to parse response: {e}")))?;

    let missing = missing_keys(&value);
    if !missing.is_empty() {
        return Err(TfLinkError::missing_fields(&missing));
    }

    serde_json::from_value(value).map_err(|e| {
        TfLinkError::invalid_response(format!("Failed to create UploadResult: {e}"))
    })
}

/// Required keys absent from the payload. A non-object lacks all of them.
fn missing_keys(value: &Value) -> Vec<&'static str> {
    let object = value.as_object();
    REQUIRED_RESPONSE_KEYS
        .iter()
        .copied()
        .filter(|key| object.is_none_or(|map| !map.contains_key(*key)))
        .collect()
}
