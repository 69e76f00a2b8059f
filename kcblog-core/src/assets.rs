//! Stylesheet download into the output tree.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory (inside the output root) that holds downloaded assets
pub const STATIC_DIR: &str = "static";
/// File name every page's `css_path` points at
pub const STYLESHEET_FILE: &str = "main.css";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads the shared stylesheet with a blocking HTTP client
pub struct AssetFetcher {
    client: reqwest::blocking::Client,
}

impl AssetFetcher {
    pub fn new() -> Result<Self, AssetError> {
        let client = client_builder().build()?;
        Ok(Self { client })
    }

    /// Download `url` to `{output_dir}/static/main.css`.
    ///
    /// The file is only written after a successful (2xx) response, so a
    /// failed fetch never leaves a partial stylesheet behind.
    pub fn fetch_stylesheet(&self, url: &str, output_dir: &Path) -> Result<PathBuf, AssetError> {
        let static_dir = output_dir.join(STATIC_DIR);
        fs::create_dir_all(&static_dir).map_err(|source| AssetError::Io {
            path: static_dir.clone(),
            source,
        })?;

        tracing::debug!("Fetching stylesheet from {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes()?;

        let dest = static_dir.join(STYLESHEET_FILE);
        fs::write(&dest, &body).map_err(|source| AssetError::Io {
            path: dest.clone(),
            source,
        })?;

        tracing::info!("Downloaded stylesheet ({} bytes) to {:?}", body.len(), dest);
        Ok(dest)
    }
}

// Follows up to 10 redirects
fn client_builder() -> reqwest::blocking::ClientBuilder {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("kcblog/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
}
