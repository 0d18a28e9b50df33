//! HTTP client wrapper for uploading files.
//!
//! This module provides the `TfLinkClient` struct which validates a local
//! file, sends it as a single multipart POST and turns the reply into an
//! [`UploadResult`] or a [`TfLinkError`].

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tracing::{Span, debug, info, instrument, warn};

use super::config::ClientConfig;
use super::constants::{AUTH_TOKEN_HEADER, CONNECT_TIMEOUT_SECS, FILE_FIELD, USER_ID_HEADER};
use super::error::TfLinkError;
use super::response::{UploadResult, classify_response};
use crate::user_agent;

/// Fallback part name when the path has no final component.
const FALLBACK_FILENAME: &str = "upload";

/// Client for the tmpfile.link upload endpoint.
///
/// Create once and reuse: the configuration is fixed at construction and
/// each `upload` call holds no state on the client, so concurrent uploads
/// through one instance are independent.
///
/// # Example
///
/// ```no_run
/// use tflink::TfLinkClient;
///
/// # async fn example() -> Result<(), tflink::TfLinkError> {
/// let client = TfLinkClient::anonymous()?;
/// let result = client.upload("report.pdf", None).await?;
/// println!("Download link: {}", result.download_link);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TfLinkClient {
    config: ClientConfig,
    upload_url: String,
    client: Client,
}

impl TfLinkClient {
    /// Creates a client from a validated config.
    ///
    /// # Errors
    ///
    /// Returns `TfLinkError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, TfLinkError> {
        let client = build_client(&config).map_err(|e| {
            TfLinkError::configuration(format!("failed to build HTTP client: {e}"))
        })?;
        let upload_url = config.upload_url();
        debug!(base_url = %config.base_url(), mode = config.mode(), "upload client created");
        Ok(Self {
            config,
            upload_url,
            client,
        })
    }

    /// Creates an anonymous client against the default service.
    ///
    /// # Errors
    ///
    /// Returns `TfLinkError::Configuration` if the HTTP client cannot be built.
    pub fn anonymous() -> Result<Self, TfLinkError> {
        Self::new(ClientConfig::default())
    }

    /// Creates an authenticated client against the default service.
    ///
    /// # Errors
    ///
    /// Returns `TfLinkError::Configuration` if either credential is empty.
    pub fn authenticated(
        user_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, TfLinkError> {
        Self::new(
            ClientConfig::builder()
                .credentials(user_id, auth_token)
                .build()?,
        )
    }

    /// Creates a client from `TFLINK_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, TfLinkError> {
        Self::new(ClientConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL uploads are posted to.
    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Whether uploads carry the credential headers.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.config.is_authenticated()
    }

    /// Uploads a file and returns its download links.
    ///
    /// The part name sent to the server is `filename` when given (and
    /// non-empty), otherwise the path's final component.
    ///
    /// # Errors
    ///
    /// - `FileAccess { NotFound }` if the path is missing or not a regular file
    /// - `Upload { TooLarge }` if the file exceeds the configured limit
    ///   (checked before any request is made) or the server answers 413
    /// - `FileAccess { ReadFailed }` if the file cannot be opened or read
    /// - `Network { .. }` if no HTTP response is obtained
    /// - `Authentication { .. }` on 401 / 403
    /// - `Upload { ServerError | Rejected | InvalidResponse }` otherwise
    #[instrument(
        skip(self, file_path, filename),
        fields(path = %file_path.as_ref().display(), name = tracing::field::Empty)
    )]
    pub async fn upload(
        &self,
        file_path: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<UploadResult, TfLinkError> {
        let path = file_path.as_ref();

        let size = self.validate_file(path).await?;
        let upload_name = resolve_upload_name(path, filename);
        Span::current().record("name", upload_name.as_str());
        debug!(bytes = size, "file validated");

        let file = tokio::fs::File::open(path)
            .await
            .map_err(TfLinkError::read_failed)?;
        // The part owns the handle; it is released when the request finishes or fails.
        let part = Part::stream_with_length(Body::from(file), size).file_name(upload_name);
        let form = Form::new().part(FILE_FIELD, part);

        let mut request = self.client.post(&self.upload_url).multipart(form);
        if let (Some(user_id), Some(auth_token)) = (self.config.user_id(), self.config.auth_token())
        {
            request = request
                .header(USER_ID_HEADER, user_id)
                .header(AUTH_TOKEN_HEADER, auth_token);
        }

        debug!(url = %self.upload_url, authenticated = self.is_authenticated(), "sending upload");
        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match classify_response(status, &body) {
            Ok(result) => {
                info!(
                    file = %result.file_name,
                    bytes = result.size_bytes,
                    uploaded_to = %result.uploaded_to,
                    "upload complete"
                );
                Ok(result)
            }
            Err(error) => {
                warn!(status, error = %error, "upload rejected");
                Err(error)
            }
        }
    }

    /// Existence, regular-file and size checks. Returns the size in bytes.
    async fn validate_file(&self, path: &Path) -> Result<u64, TfLinkError> {
        // Any stat failure reads as "does not exist".
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| TfLinkError::file_not_found(path))?;
        if !metadata.is_file() {
            return Err(TfLinkError::not_a_file(path));
        }

        let size = metadata.len();
        if size > self.config.max_file_size() {
            return Err(TfLinkError::file_too_large(
                size,
                self.config.max_file_size(),
            ));
        }
        Ok(size)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> TfLinkError {
        if error.is_timeout() {
            TfLinkError::timeout(self.config.timeout_secs(), Some(error))
        } else if error.is_connect() {
            TfLinkError::connection_failed(error)
        } else if let Some(io_error) = file_io_error(&error) {
            TfLinkError::read_failed(io_error)
        } else {
            TfLinkError::request_failed(error)
        }
    }
}

impl fmt::Display for TfLinkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TfLinkClient(base_url='{}', mode='{}')",
            self.config.base_url(),
            self.config.mode()
        )
    }
}

fn build_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    let connect_timeout = Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout());
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(config.timeout())
        .user_agent(user_agent::default_user_agent())
        .build()
}

fn resolve_upload_name(path: &Path, filename: Option<&str>) -> String {
    filename
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// An IO error from reading the request body (the file), as opposed to the socket.
fn file_io_error(error: &reqwest::Error) -> Option<std::io::Error> {
    if !(error.is_body() || error.is_request()) {
        return None;
    }
    file_io_error_in_chain(std::error::Error::source(error))
}

/// First IO error in a source chain, unless it is a socket error.
fn file_io_error_in_chain(
    mut source: Option<&(dyn std::error::Error + 'static)>,
) -> Option<std::io::Error> {
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return (!is_socket_error_kind(io_error.kind()))
                .then(|| std::io::Error::new(io_error.kind(), io_error.to_string()));
        }
        source = cause.source();
    }
    None
}

fn is_socket_error_kind(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionRefused
            | ErrorKind::NotConnected
            | ErrorKind::BrokenPipe
            | ErrorKind::TimedOut
            | ErrorKind::UnexpectedEof
    )
}
