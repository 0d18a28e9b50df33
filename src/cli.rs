//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use tflink::ClientConfig;
use tflink::upload::constants::{
    ENV_AUTH_TOKEN, ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_USER_ID, MIB,
};

/// Upload files to tmpfile.link and print their download links.
///
/// Credentials and endpoint fall back to the TFLINK_USER_ID, TFLINK_AUTH_TOKEN,
/// TFLINK_BASE_URL and TFLINK_TIMEOUT_SECS environment variables.
#[derive(Parser)]
#[command(name = "tflink")]
#[command(author, version, about)]
pub struct Args {
    /// Files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Upload under this name instead of the file's own (single file only)
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// User id for authenticated uploads (requires --auth-token)
    #[arg(long)]
    pub user_id: Option<String>,

    /// Auth token for authenticated uploads (requires --user-id)
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Largest file to send, in MiB (1-102400)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=102_400))]
    pub max_size_mb: Option<u64>,

    /// Print each result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Rejects flag combinations clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_some() && self.files.len() > 1 {
            bail!("--name can only be used when uploading a single file");
        }
        Ok(())
    }

    /// Builds the client config: flags first, then the environment, then defaults.
    pub fn client_config<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = self.timeout.map(|secs| secs.to_string());
        let flag = |name: &str| match name {
            ENV_USER_ID => self.user_id.clone(),
            ENV_AUTH_TOKEN => self.auth_token.clone(),
            ENV_BASE_URL => self.base_url.clone(),
            ENV_TIMEOUT_SECS => timeout.clone(),
            _ => None,
        };

        let mut builder = ClientConfig::builder_from_lookup(|name| {
            flag(name)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| lookup(name))
        })?;
        if let Some(mb) = self.max_size_mb {
            builder = builder.max_file_size(mb * MIB);
        }

        Ok(builder.build()?)
    }
}
