//! CLI entry point for the tflink uploader.

use anyhow::{Result, bail};
use clap::Parser;
use tflink::{TfLinkClient, UploadResult};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    args.validate()?;
    let config = args.client_config(|name| std::env::var(name).ok())?;
    let client = TfLinkClient::new(config)?;
    debug!(files = args.files.len(), client = %client, "CLI arguments parsed");

    let mut failed = 0_usize;
    for path in &args.files {
        match client.upload(path, args.name.as_deref()).await {
            Ok(result) => print_result(&result, args.json, args.quiet)?,
            Err(err) => {
                failed += 1;
                error!(path = %path.display(), "{err}");
            }
        }
    }

    let total = args.files.len();
    if failed > 0 {
        bail!("{failed} of {total} uploads failed");
    }
    info!(total, "all uploads complete");
    Ok(())
}

fn print_result(result: &UploadResult, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else if quiet {
        println!("{}", result.download_link);
    } else {
        println!(
            "{} ({} bytes, {}) -> {}",
            result.file_name, result.size_bytes, result.file_type, result.uploaded_to
        );
        println!("  link:    {}", result.download_link);
        println!("  encoded: {}", result.download_link_encoded);
    }
    Ok(())
}
