//! User-Agent string sent with upload requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://tmpfile.link";

/// Default User-Agent for upload requests (identifies the library and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("tflink-rs/{version} (+{PROJECT_UA_URL})")
}
