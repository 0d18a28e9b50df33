//! tflink - client library for the tmpfile.link upload service.
//!
//! Upload a local file and get back two equivalent download links: a
//! human-readable one and a percent-encoded one.
//!
//! # Architecture
//!
//! - [`upload`] - configuration, the upload client, the result type and
//!   the error taxonomy
//!
//! ```no_run
//! # async fn example() -> Result<(), tflink::TfLinkError> {
//! let client = tflink::TfLinkClient::anonymous()?;
//! let result = client.upload("path/to/file.pdf", None).await?;
//! println!("{}", result.download_link);
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod upload;
mod user_agent;

// Re-export commonly used types
pub use upload::{
    AuthFailure, ClientConfig, ClientConfigBuilder, FileAccessKind, NetworkFailure, TfLinkClient,
    TfLinkError, UploadFailure, UploadResult,
};
