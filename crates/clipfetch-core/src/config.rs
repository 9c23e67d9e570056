//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML and carries
//! sub-configs for the server, external tools, URL validation, and the
//! fallback providers. Every section defaults sensibly so a completely
//! empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Environment variable overriding the yt-dlp binary path.
pub const ENV_YTDLP_PATH: &str = "CLIPFETCH_YTDLP_PATH";
/// Environment variable overriding the ffmpeg binary path.
pub const ENV_FFMPEG_PATH: &str = "CLIPFETCH_FFMPEG_PATH";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tools: ToolsConfig,
    pub validation: ValidationConfig,
    pub providers: ProvidersConfig,
    pub download: DownloadConfig,
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| Error::Internal(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to the default
    /// search locations and finally to defaults. Environment variable
    /// overrides for tool paths are applied last.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let mut config = match path {
            Some(p) => Self::read_file(p),
            None => Self::from_search_paths(),
        };
        config.tools.apply_env_overrides();
        config
    }

    fn read_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn from_search_paths() -> Self {
        let candidates = [
            PathBuf::from("./clipfetch.toml"),
            PathBuf::from("./config.toml"),
            dirs_config_path(),
            PathBuf::from("/etc/clipfetch/config.toml"),
        ];
        for candidate in candidates {
            if candidate.exists() {
                return Self::read_file(&candidate);
            }
        }
        Self::default()
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if let Some(ref p) = self.tools.ytdlp_path {
            if !p.exists() {
                warnings.push(format!(
                    "tools.ytdlp_path {} does not exist; falling back to PATH lookup",
                    p.display()
                ));
            }
        }
        if let Some(ref p) = self.tools.ffmpeg_path {
            if !p.exists() {
                warnings.push(format!(
                    "tools.ffmpeg_path {} does not exist; falling back to PATH lookup",
                    p.display()
                ));
            }
        }

        if let Err(e) = self.validation.compile_pattern() {
            warnings.push(format!(
                "validation.url_pattern is not a valid regex ({e}); using the default"
            ));
        }

        warnings
    }
}

fn dirs_config_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(".config/clipfetch/config.toml"))
        .unwrap_or_else(|| PathBuf::from("/etc/clipfetch/config.toml"))
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// External tool settings.
///
/// Explicit paths win over `PATH` lookup; the `CLIPFETCH_YTDLP_PATH` and
/// `CLIPFETCH_FFMPEG_PATH` environment variables win over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ytdlp_path: Option<PathBuf>,
    pub ffmpeg_path: Option<PathBuf>,
    /// Maximum subprocess runtime in seconds.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            timeout_secs: 300,
        }
    }
}

impl ToolsConfig {
    /// Apply `CLIPFETCH_YTDLP_PATH` / `CLIPFETCH_FFMPEG_PATH` overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(p) = std::env::var_os(ENV_YTDLP_PATH) {
            self.ytdlp_path = Some(PathBuf::from(p));
        }
        if let Some(p) = std::env::var_os(ENV_FFMPEG_PATH) {
            self.ffmpeg_path = Some(PathBuf::from(p));
        }
    }
}

/// URL shape validation.
///
/// The exact pattern is deployment-specific, so it is configurable rather
/// than hardcoded; the default accepts TikTok page and short-link URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub url_pattern: String,
}

/// Default URL pattern: TikTok page or short-link domains.
pub const DEFAULT_URL_PATTERN: &str = r"(?i)^https?://(www\.)?(tiktok\.com|vm\.tiktok\.com)/.+";

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            url_pattern: DEFAULT_URL_PATTERN.into(),
        }
    }
}

impl ValidationConfig {
    /// Compile the configured pattern.
    pub fn compile_pattern(&self) -> std::result::Result<regex::Regex, regex::Error> {
        regex::Regex::new(&self.url_pattern)
    }

    /// Compile the configured pattern, falling back to the default when it
    /// is invalid.
    pub fn pattern_or_default(&self) -> regex::Regex {
        self.compile_pattern().unwrap_or_else(|e| {
            tracing::warn!("Invalid validation.url_pattern ({e}); using default");
            regex::Regex::new(DEFAULT_URL_PATTERN).expect("default pattern compiles")
        })
    }
}

/// Base URLs for the fallback resolver providers.
///
/// Overridable so deployments can swap endpoints as scraping sites come
/// and go (and so tests can point them at a mock server).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub ssstik_url: String,
    pub snaptik_url: String,
    pub cdn_guess_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            ssstik_url: "https://ssstik.io".into(),
            snaptik_url: "https://snaptik.app".into(),
            cdn_guess_url: "https://www.tikwm.com".into(),
        }
    }
}

/// Generic HTTP download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Maximum time for a single HTTP transfer, in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent to provider endpoints and CDNs. Several providers
    /// serve different markup to non-browser agents.
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_valid() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tools.timeout_secs, 300);
        assert!(config.tools.ytdlp_path.is_none());
    }

    #[test]
    fn parse_partial_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9090

            [tools]
            ytdlp_path = "/opt/yt-dlp"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.tools.ytdlp_path, Some(PathBuf::from("/opt/yt-dlp")));
    }

    #[test]
    fn default_pattern_matches_tiktok_urls() {
        let re = ValidationConfig::default().pattern_or_default();
        assert!(re.is_match("https://www.tiktok.com/@user/video/123456"));
        assert!(re.is_match("https://vm.tiktok.com/ZM8abcdef/"));
        assert!(re.is_match("HTTP://TIKTOK.COM/@user/video/1"));
        assert!(!re.is_match("https://example.com/watch?v=abc"));
        assert!(!re.is_match("not a url"));
    }

    #[test]
    fn invalid_pattern_falls_back_to_default() {
        let validation = ValidationConfig {
            url_pattern: "([unclosed".into(),
        };
        let re = validation.pattern_or_default();
        assert!(re.is_match("https://www.tiktok.com/@user/video/123456"));
    }

    #[test]
    fn invalid_pattern_is_a_warning() {
        let mut config = Config::default();
        config.validation.url_pattern = "([unclosed".into();
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("url_pattern")));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::load_or_default(Some(Path::new("/nonexistent/clipfetch.toml")));
        assert_eq!(config.server.port, 8080);
    }
}
