//! Shared fixtures for the upload and CLI tests.
//!
//! Every helper that needs the network goes through [`upload_server`], which
//! returns `None` when the sandbox forbids binding a localhost port. Set
//! `TFLINK_REQUIRE_SOCKET_TESTS=1` in CI to turn that skip into a failure.

#![allow(dead_code)]

use std::net::TcpListener;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const UPLOAD_PATH: &str = "/api/upload";
pub const DOWNLOAD_LINK: &str = "https://d.tmpfile.link/public/2025-01-01/uuid-123/test.txt";
pub const DOWNLOAD_LINK_ENCODED: &str =
    "https://d.tmpfile.link/public%2F2025-01-01%2Fuuid-123%2Ftest.txt";

/// Mock tmpfile.link server, or `None` when localhost cannot be bound.
pub async fn upload_server() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }
    let required = std::env::var("TFLINK_REQUIRE_SOCKET_TESTS")
        .is_ok_and(|value| matches!(value.as_str(), "1" | "true" | "yes"));
    assert!(
        !required,
        "cannot bind a localhost port for the mock upload server"
    );
    eprintln!("skipping: cannot bind a localhost port for the mock upload server");
    None
}

/// Success payload as the service returns it, for a `test.txt` upload.
pub fn success_body(uploaded_to: &str) -> Value {
    json!({
        "fileName": "test.txt",
        "downloadLink": DOWNLOAD_LINK,
        "downloadLinkEncoded": DOWNLOAD_LINK_ENCODED,
        "size": 1024,
        "type": "text/plain",
        "uploadedTo": uploaded_to,
    })
}

/// Answers every upload with [`success_body`].
pub async fn mount_success(server: &MockServer, uploaded_to: &str) {
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(uploaded_to)))
        .mount(server)
        .await;
}

/// Writes `content` to `name` inside a fresh temp dir.
pub fn write_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, content).expect("failed to write fixture");
    (temp_dir, file_path)
}

/// Creates a sparse file of `len` bytes (no disk usage for large sizes).
pub fn sparse_file(name: &str, len: u64) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let file_path = temp_dir.path().join(name);
    std::fs::File::create(&file_path)
        .and_then(|file| file.set_len(len))
        .expect("failed to size fixture");
    (temp_dir, file_path)
}
