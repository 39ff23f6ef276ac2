//! Same-host image downloading
//!
//! Images are only downloaded from the approved host, only when the server
//! says they are images, and only once: an existing destination file is
//! never overwritten. Response bytes stream to disk chunk by chunk, so a
//! large image never sits fully in memory.

use crate::url::ApprovedHost;
use crate::HostboundError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Result of one image download attempt
///
/// Downloads never abort the crawl; every failure mode is an outcome.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// Bytes written to a new file
    Saved(PathBuf),

    /// Destination file already present; nothing written
    SkippedExists(PathBuf),

    /// URL is not on the approved host; no request made
    SkippedExternal,

    /// Response Content-Type does not start with `image/`
    SkippedNotImage(String),

    /// Fetch or filesystem failure, described for reporting
    Failed(String),
}

/// Downloads in-scope images into a single output directory
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: Client,
    out_dir: PathBuf,
}

impl ImageDownloader {
    pub fn new(client: Client, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Attempts to download one image
    ///
    /// The scope check runs before any network traffic: an off-host URL
    /// produces [`DownloadOutcome::SkippedExternal`] without a request.
    /// Creates the output directory if absent; writes at most one file.
    pub async fn download(&self, url: &Url, scope: &ApprovedHost) -> DownloadOutcome {
        if !scope.permits(url) {
            return DownloadOutcome::SkippedExternal;
        }

        match self.try_download(url).await {
            Ok(outcome) => outcome,
            Err(e) => DownloadOutcome::Failed(e.to_string()),
        }
    }

    async fn try_download(&self, url: &Url) -> Result<DownloadOutcome, HostboundError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if !content_type.starts_with("image/") {
            return Ok(DownloadOutcome::SkippedNotImage(content_type));
        }

        fs::create_dir_all(&self.out_dir).await?;

        let dest = self.out_dir.join(derive_filename(url));
        if fs::try_exists(&dest).await? {
            return Ok(DownloadOutcome::SkippedExists(dest));
        }

        let mut file = fs::File::create(&dest).await?;
        let mut response = response;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::debug!(url = %url, dest = %dest.display(), "image saved");
        Ok(DownloadOutcome::Saved(dest))
    }
}

/// Derives a deterministic filename for an image URL
///
/// The URL path's base name is used as-is when it carries an extension.
/// Without one, `.jpg` or `.png` is appended when the path loosely suggests
/// it; otherwise the name gets a 10-hex-character SHA-256 suffix and a
/// `.jpg` extension so distinct URLs cannot collide.
pub fn derive_filename(url: &Url) -> String {
    let base = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("image");

    if has_extension(base) {
        return base.to_string();
    }

    let path = url.path().to_ascii_lowercase();
    if path.contains(".jpg") {
        return format!("{base}.jpg");
    }
    if path.contains(".png") {
        return format!("{base}.png");
    }

    let digest = hex::encode(Sha256::digest(url.as_str().as_bytes()));
    format!("{base}-{}.jpg", &digest[..10])
}

fn has_extension(name: &str) -> bool {
    matches!(name.rsplit_once('.'), Some((stem, ext)) if !stem.is_empty() && !ext.is_empty())
}
