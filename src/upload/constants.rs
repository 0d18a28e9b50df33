//! Constants for the upload module (defaults, wire names).

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://tmpfile.link";

/// Path of the upload endpoint relative to the base URL.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Default total request timeout (5 minutes for large files).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Connect timeout, capped by the total timeout when that is shorter.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Bytes per mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Default client-side size limit (100 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * MIB;

/// Multipart field carrying the file bytes.
pub const FILE_FIELD: &str = "file";

/// Header carrying the user id on authenticated uploads.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Header carrying the auth token on authenticated uploads.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Keys a success payload must contain, in reporting order.
pub const REQUIRED_RESPONSE_KEYS: [&str; 6] = [
    "fileName",
    "downloadLink",
    "downloadLinkEncoded",
    "size",
    "type",
    "uploadedTo",
];

/// Environment variable names read by `ClientConfig::from_env`.
pub const ENV_USER_ID: &str = "TFLINK_USER_ID";
pub const ENV_AUTH_TOKEN: &str = "TFLINK_AUTH_TOKEN";
pub const ENV_BASE_URL: &str = "TFLINK_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TFLINK_TIMEOUT_SECS";
