//! Upload client for the tmpfile.link service.
//!
//! This module validates a local file, posts it as `multipart/form-data`
//! to `{base_url}/api/upload` and maps the reply to a typed result.
//!
//! # Features
//!
//! - Anonymous or header-authenticated uploads (`X-User-Id` / `X-Auth-Token`)
//! - Client-side size limit checked before any network traffic
//! - File bytes streamed from disk, not buffered in memory
//! - One attempt per call; every failure is a [`TfLinkError`] variant
//!
//! # Example
//!
//! ```no_run
//! use tflink::{ClientConfig, TfLinkClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::builder()
//!     .credentials("YOUR_USER_ID", "YOUR_AUTH_TOKEN")
//!     .build()?;
//! let client = TfLinkClient::new(config)?;
//! let result = client.upload("notes.txt", Some("meeting-notes.txt")).await?;
//! println!("{}", result.download_link);
//! println!("{}", result.download_link_encoded);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod constants;
mod error;
mod response;

pub use client::TfLinkClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{AuthFailure, FileAccessKind, NetworkFailure, TfLinkError, UploadFailure};
pub use response::UploadResult;
