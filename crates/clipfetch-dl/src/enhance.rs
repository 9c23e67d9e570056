//! ffmpeg enhancement pass for watermark-free downloads.
//!
//! Upscales to 1080p with lanczos, applies an unsharp mask, and nudges
//! contrast/saturation, re-encoding with libx264 at CRF 18. Callers treat
//! this as best-effort: if ffmpeg is missing or fails, the unenhanced file
//! is served instead.

use std::path::{Path, PathBuf};

use crate::command::ToolCommand;
use crate::staging::StagingDir;
use crate::tools::{ToolRegistry, FFMPEG};

/// Video filter chain: lanczos upscale, unsharp mask, color/contrast tune.
const ENHANCE_FILTER: &str = "scale=1920:1080:flags=lanczos,\
                              unsharp=3:3:1.5:3:3:0.5,\
                              eq=contrast=1.1:brightness=0.05:saturation=1.2";

/// Re-encode `input` into an enhanced copy inside the staging directory.
///
/// Returns the enhanced file's path. The input file is left untouched.
pub async fn enhance(
    registry: &ToolRegistry,
    staging: &StagingDir,
    input: &Path,
) -> clipfetch_core::Result<PathBuf> {
    let tool = registry.require(FFMPEG)?;
    let output = staging.file("enhanced_video.mp4");

    ToolCommand::new(tool.path.clone())
        .arg("-i")
        .arg(input.to_string_lossy().into_owned())
        .arg("-vf")
        .arg(ENHANCE_FILTER)
        .args(["-c:v", "libx264", "-crf", "18", "-preset", "medium"])
        .args(["-c:a", "aac", "-b:a", "192k"])
        .arg(output.to_string_lossy().into_owned())
        .timeout(tool.timeout)
        .execute()
        .await?;

    if !output.exists() {
        return Err(clipfetch_core::Error::tool(
            FFMPEG,
            "enhanced file was not created",
        ));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_chain_is_a_single_argument() {
        assert!(!ENHANCE_FILTER.contains(char::is_whitespace));
        assert!(ENHANCE_FILTER.contains("scale=1920:1080:flags=lanczos"));
        assert!(ENHANCE_FILTER.contains("unsharp=3:3:1.5:3:3:0.5"));
        assert!(ENHANCE_FILTER.contains("eq=contrast=1.1"));
    }

    #[tokio::test]
    async fn enhance_without_ffmpeg_errors() {
        let cfg = clipfetch_core::config::ToolsConfig {
            ffmpeg_path: Some("/nonexistent/ffmpeg".into()),
            ..Default::default()
        };
        // If a real ffmpeg is on PATH the registry will find it; only
        // assert the missing-tool path when discovery came up empty.
        let registry = ToolRegistry::discover(&cfg);
        if registry.get(FFMPEG).is_none() {
            let staging = StagingDir::new().unwrap();
            let result = enhance(&registry, &staging, Path::new("in.mp4")).await;
            assert!(result.is_err());
        }
    }
}
