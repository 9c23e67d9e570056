//! yt-dlp invocation: metadata probing and format-aware downloading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use clipfetch_core::MediaFormat;

use crate::command::ToolCommand;
use crate::staging::StagingDir;
use crate::tools::{ToolConfig, ToolRegistry, FFMPEG};

/// Subset of the `--dump-json` output clipfetch cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Video title as reported by the extractor.
    pub title: Option<String>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    /// Canonical page URL.
    pub webpage_url: Option<String>,
    /// Uploader handle, when the extractor reports one.
    #[serde(default)]
    pub uploader: Option<String>,
}

/// Probe a URL with `yt-dlp --simulate --dump-json`, without downloading.
///
/// # Errors
///
/// Returns [`clipfetch_core::Error::Tool`] when yt-dlp exits non-zero
/// (unsupported or dead URL) and [`clipfetch_core::Error::Parse`] when its
/// stdout is not the expected JSON document.
pub async fn probe(tool: &ToolConfig, url: &str) -> clipfetch_core::Result<VideoInfo> {
    let output = ToolCommand::new(tool.path.clone())
        .arg("--simulate")
        .arg("--dump-json")
        .arg(url)
        .timeout(tool.timeout)
        .execute()
        .await?;

    serde_json::from_str(&output.stdout)
        .map_err(|e| clipfetch_core::Error::parse("yt-dlp", format!("invalid JSON: {e}")))
}

/// Download a URL into the staging directory and return the produced file.
///
/// The format selects the yt-dlp arguments: audio extraction to MP3,
/// a non-h264 (watermark-free) stream, or whatever the site calls "best".
/// When ffmpeg was discovered, its location is passed through so yt-dlp
/// can use it for extraction and merging.
pub async fn download(
    registry: &ToolRegistry,
    staging: &StagingDir,
    url: &str,
    format: MediaFormat,
) -> clipfetch_core::Result<PathBuf> {
    let tool = registry.require(crate::tools::YTDLP)?;

    let mut cmd = ToolCommand::new(tool.path.clone());
    cmd.timeout(tool.timeout);

    if let Some(ffmpeg) = registry.get(FFMPEG) {
        cmd.arg("--ffmpeg-location");
        cmd.arg(ffmpeg.path.to_string_lossy().into_owned());
    }

    cmd.args(format_args(format));
    cmd.arg("-o");
    cmd.arg(staging.output_template());
    cmd.arg(url);

    tracing::debug!(url, %format, "Running yt-dlp download");
    let output = cmd.execute().await?;
    if !output.stderr.is_empty() {
        tracing::debug!("yt-dlp stderr: {}", output.stderr.trim());
    }

    staging.first_file()
}

/// The yt-dlp selection arguments for a format.
fn format_args(format: MediaFormat) -> Vec<&'static str> {
    match format {
        MediaFormat::Audio => vec!["-x", "--audio-format", "mp3"],
        MediaFormat::NoWatermark => vec!["-f", "bv*[vcodec!=h264]+ba/b"],
        MediaFormat::Video => vec!["-f", "best"],
    }
}
