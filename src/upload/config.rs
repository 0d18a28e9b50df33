//! Client configuration: credentials, endpoint, timeout and size limit.
//!
//! A `ClientConfig` is validated once by [`ClientConfigBuilder::build`] and
//! never changes afterwards, so a client can be shared across tasks freely.

use std::fmt;
use std::time::Duration;

use url::Url;

use super::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_FILE_SIZE, DEFAULT_TIMEOUT_SECS, ENV_AUTH_TOKEN, ENV_BASE_URL,
    ENV_TIMEOUT_SECS, ENV_USER_ID, UPLOAD_PATH,
};
use super::error::TfLinkError;

/// Validated, immutable settings for a [`TfLinkClient`](super::TfLinkClient).
#[derive(Clone)]
pub struct ClientConfig {
    user_id: Option<String>,
    auth_token: Option<String>,
    base_url: String,
    timeout_secs: u64,
    max_file_size: u64,
}

impl ClientConfig {
    /// Starts a builder with the anonymous defaults.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Builds a config from `TFLINK_*` environment variables.
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `TfLinkError::Configuration` if only one credential is set,
    /// the timeout is not a positive integer, or the base URL is invalid.
    pub fn from_env() -> Result<Self, TfLinkError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, TfLinkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::builder_from_lookup(lookup)?.build()
    }

    /// Starts a builder seeded from `TFLINK_*` names resolved through `lookup`.
    ///
    /// Blank values count as unset. Callers layer further overrides on the
    /// returned builder before calling `build`.
    ///
    /// # Errors
    ///
    /// Returns `TfLinkError::Configuration` if `TFLINK_TIMEOUT_SECS` is not an integer.
    pub fn builder_from_lookup<F>(lookup: F) -> Result<ClientConfigBuilder, TfLinkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut builder = Self::builder();
        if let Some(user_id) = lookup(ENV_USER_ID) {
            builder = builder.user_id(user_id);
        }
        if let Some(auth_token) = lookup(ENV_AUTH_TOKEN) {
            builder = builder.auth_token(auth_token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                TfLinkError::configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a positive integer, got '{raw}'"
                ))
            })?;
            builder = builder.timeout_secs(secs);
        }
        Ok(builder)
    }

    /// User id, present only for authenticated configs.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Auth token, present only for authenticated configs.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the upload endpoint.
    #[must_use]
    pub fn upload_url(&self) -> String {
        format!("{}{UPLOAD_PATH}", self.base_url)
    }

    /// Total request timeout in seconds.
    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Largest file (in bytes) the client will attempt to send.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether requests carry the credential headers.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some() && self.auth_token.is_some()
    }

    /// `"authenticated"` or `"anonymous"`.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        if self.is_authenticated() {
            "authenticated"
        } else {
            "anonymous"
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            auth_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

// Hand-written so the token never reaches logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user_id", &self.user_id)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_file_size", &self.max_file_size)
            .finish()
    }
}

/// Builder for [`ClientConfig`].
///
/// ```
/// use tflink::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .credentials("user-1", "token-1")
///     .timeout_secs(600)
///     .build()
///     .unwrap();
/// assert!(config.is_authenticated());
/// ```
#[derive(Default)]
pub struct ClientConfigBuilder {
    user_id: Option<String>,
    auth_token: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    max_file_size: Option<u64>,
}

impl ClientConfigBuilder {
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Sets both credentials at once.
    #[must_use]
    pub fn credentials(self, user_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        self.user_id(user_id).auth_token(auth_token)
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    #[must_use]
    pub fn max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = Some(max_file_size);
        self
    }

    /// Validates the settings and produces a config.
    ///
    /// Empty credential strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns `TfLinkError::Configuration` if:
    /// - exactly one of user id / auth token is set
    /// - the base URL is not an absolute http(s) URL
    /// - the timeout or size limit is zero
    pub fn build(self) -> Result<ClientConfig, TfLinkError> {
        let user_id = self.user_id.filter(|value| !value.is_empty());
        let auth_token = self.auth_token.filter(|value| !value.is_empty());
        if user_id.is_some() != auth_token.is_some() {
            return Err(TfLinkError::partial_credentials());
        }

        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(TfLinkError::configuration(
                "timeout must be a positive number of seconds",
            ));
        }

        let max_file_size = self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE);
        if max_file_size == 0 {
            return Err(TfLinkError::configuration(
                "max_file_size must be a positive number of bytes",
            ));
        }

        Ok(ClientConfig {
            user_id,
            auth_token,
            base_url,
            timeout_secs,
            max_file_size,
        })
    }
}

/// Strips trailing slashes and checks the result is an absolute http(s) URL.
fn normalize_base_url(raw: &str) -> Result<String, TfLinkError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || TfLinkError::configuration(format!("invalid base URL: {raw}"));
    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::upload::constants::MIB;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_anonymous() {
        let config = ClientConfig::builder().build().unwrap();
        assert_eq!(config.user_id(), None);
        assert_eq!(config.auth_token(), None);
        assert_eq!(config.base_url(), "https://tmpfile.link");
        assert_eq!(config.upload_url(), "https://tmpfile.link/api/upload");
        assert_eq!(config.timeout_secs(), 300);
        assert_eq!(config.max_file_size(), 100 * MIB);
        assert!(!config.is_authenticated());
        assert_eq!(config.mode(), "anonymous");
    }

    #[test]
    fn test_default_impl_matches_builder_defaults() {
        let built = ClientConfig::builder().build().unwrap();
        let default = ClientConfig::default();
        assert_eq!(built.base_url(), default.base_url());
        assert_eq!(built.timeout_secs(), default.timeout_secs());
        assert_eq!(built.max_file_size(), default.max_file_size());
    }

    #[test]
    fn test_both_credentials_authenticate() {
        let config = ClientConfig::builder()
            .credentials("test_user", "test_token")
            .build()
            .unwrap();
        assert_eq!(config.user_id(), Some("test_user"));
        assert_eq!(config.auth_token(), Some("test_token"));
        assert!(config.is_authenticated());
        assert_eq!(config.mode(), "authenticated");
    }

    #[test]
    fn test_partial_credentials_rejected() {
        let only_user = ClientConfig::builder().user_id("test_user").build();
        assert!(matches!(only_user, Err(TfLinkError::Configuration { .. })));

        let only_token = ClientConfig::builder().auth_token("test_token").build();
        assert!(matches!(only_token, Err(TfLinkError::Configuration { .. })));
    }

    #[test]
    fn test_empty_credential_counts_as_absent() {
        let result = ClientConfig::builder()
            .user_id("test_user")
            .auth_token("")
            .build();
        assert!(matches!(result, Err(TfLinkError::Configuration { .. })));

        let config = ClientConfig::builder()
            .credentials("", "")
            .build()
            .unwrap();
        assert!(!config.is_authenticated());
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = ClientConfig::builder()
            .base_url("https://custom.example.com///")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "https://custom.example.com");
        assert_eq!(config.upload_url(), "https://custom.example.com/api/upload");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        for raw in ["not a url", "ftp://files.example.com", "https://"] {
            let result = ClientConfig::builder().base_url(raw).build();
            assert!(
                matches!(result, Err(TfLinkError::Configuration { .. })),
                "Expected configuration error for {raw}"
            );
        }
    }

    #[test]
    fn test_zero_timeout_and_size_rejected() {
        assert!(ClientConfig::builder().timeout_secs(0).build().is_err());
        assert!(ClientConfig::builder().max_file_size(0).build().is_err());
    }

    #[test]
    fn test_custom_timeout_and_size() {
        let config = ClientConfig::builder()
            .timeout_secs(600)
            .max_file_size(50 * MIB)
            .build()
            .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(600));
        assert_eq!(config.max_file_size(), 50 * MIB);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::builder()
            .credentials("test_user", "super-secret-token")
            .build()
            .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-token"), "Token leaked: {debug}");
        assert!(debug.contains("test_user"));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_USER_ID, "env_user"),
            (ENV_AUTH_TOKEN, "env_token"),
            (ENV_BASE_URL, "http://localhost:8080/"),
            (ENV_TIMEOUT_SECS, "45"),
        ]))
        .unwrap();
        assert!(config.is_authenticated());
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.timeout_secs(), 45);
    }

    #[test]
    fn test_from_lookup_empty_environment_gives_defaults() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert!(!config.is_authenticated());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        match result {
            Err(TfLinkError::Configuration { message }) => {
                assert!(message.contains("soon"), "Got: {message}");
            }
            other => panic!("Expected configuration error, got: {other:?}"),
        }
    }

    #[test]
    fn test_from_lookup_blank_variables_count_as_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, ""),
            (ENV_USER_ID, "  "),
            (ENV_AUTH_TOKEN, ""),
            (ENV_TIMEOUT_SECS, " "),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(!config.is_authenticated());
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_lookup_rejects_partial_credentials() {
        let result = ClientConfig::from_lookup(lookup_from(&[(ENV_USER_ID, "env_user")]));
        assert!(matches!(result, Err(TfLinkError::Configuration { .. })));
    }
}
