//! Per-request staging directories.
//!
//! Every download request gets its own uniquely named [`StagingDir`] where
//! yt-dlp and ffmpeg write their output. The directory is removed when the
//! value is dropped, so no request can leak files past its own lifetime
//! and concurrent requests can never collide on a shared path.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A uniquely named temporary directory scoped to a single request.
pub struct StagingDir {
    temp_dir: TempDir,
}

impl StagingDir {
    /// Create a new staging directory under the system temp root.
    pub fn new() -> clipfetch_core::Result<Self> {
        let temp_dir = TempDir::with_prefix("clipfetch-").map_err(|e| {
            clipfetch_core::Error::Internal(format!("failed to create staging dir: {e}"))
        })?;
        Ok(Self { temp_dir })
    }

    /// Path to the staging directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path for a named file inside the staging directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// The yt-dlp output template: `video.%(ext)s` inside this directory.
    ///
    /// A fixed stem sidesteps every problem with titles containing shell
    /// metacharacters or emoji; the real title only appears in the
    /// Content-Disposition header, never on disk.
    pub fn output_template(&self) -> String {
        self.file("video.%(ext)s").to_string_lossy().into_owned()
    }

    /// Find the first regular file in the staging directory (lexicographic
    /// order, so repeated calls are deterministic).
    ///
    /// # Errors
    ///
    /// Returns [`clipfetch_core::Error::Tool`] when the directory contains
    /// no file, which means the downloader claimed success but produced
    /// nothing.
    pub fn first_file(&self) -> clipfetch_core::Result<PathBuf> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(self.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        entries.sort();

        entries.into_iter().next().ok_or_else(|| {
            clipfetch_core::Error::Tool {
                tool: "yt-dlp".to_string(),
                message: "no output file was produced".to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn staging_dirs_are_unique() {
        let a = StagingDir::new().unwrap();
        let b = StagingDir::new().unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().exists());
        assert!(b.path().exists());
    }

    #[test]
    fn dropped_staging_dir_is_removed() {
        let staging = StagingDir::new().unwrap();
        let path = staging.path().to_path_buf();
        fs::write(staging.file("video.mp4"), b"data").unwrap();
        assert!(path.exists());

        drop(staging);
        assert!(!path.exists());
    }

    #[test]
    fn first_file_finds_download() {
        let staging = StagingDir::new().unwrap();
        fs::write(staging.file("video.mp4"), b"data").unwrap();

        let found = staging.first_file().unwrap();
        assert_eq!(found.file_name().unwrap(), "video.mp4");
    }

    #[test]
    fn first_file_errors_when_empty() {
        let staging = StagingDir::new().unwrap();
        let err = staging.first_file().unwrap_err();
        assert!(err.to_string().contains("no output file"));
    }

    #[test]
    fn output_template_lives_in_staging_dir() {
        let staging = StagingDir::new().unwrap();
        let template = staging.output_template();
        assert!(template.starts_with(staging.path().to_string_lossy().as_ref()));
        assert!(template.ends_with("video.%(ext)s"));
    }
}
