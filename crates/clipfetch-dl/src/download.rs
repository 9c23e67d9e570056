//! Generic HTTP download of a resolved media URL.

use reqwest::Client;
use std::time::Duration;

use clipfetch_core::config::DownloadConfig;
use clipfetch_core::{Error, Result};

/// Number of redirects followed before a transfer is abandoned. CDN links
/// returned by the resolver sites usually bounce through one or two
/// signed-URL hops.
const MAX_REDIRECTS: usize = 10;

/// A downloaded media payload.
#[derive(Debug)]
pub struct DownloadedMedia {
    /// The raw bytes.
    pub bytes: Vec<u8>,
    /// File extension derived from the response `Content-Type`.
    pub extension: &'static str,
}

/// Build the shared HTTP client used for providers and media downloads:
/// browser-like User-Agent, redirect following, and a transfer timeout.
pub fn build_client(config: &DownloadConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))
}

/// Download `url` into memory.
///
/// # Errors
///
/// Returns [`Error::Http`] on transport failures or a non-success status.
pub async fn fetch_media(client: &Client, url: &str) -> Result<DownloadedMedia> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Http(format!("download request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http(format!("failed to download {url}: {status}")));
    }

    let extension = extension_for(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
    );

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("failed to read download body: {e}")))?;

    Ok(DownloadedMedia {
        bytes: bytes.to_vec(),
        extension,
    })
}

/// Map a `Content-Type` to a file extension. Anything that is not clearly
/// audio is treated as MP4 video, matching what the resolver sites serve.
fn extension_for(content_type: &str) -> &'static str {
    if content_type.contains("audio") {
        "mp3"
    } else {
        "mp4"
    }
}
