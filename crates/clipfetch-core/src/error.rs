//! Unified error type for the clipfetch application.
//!
//! All crates funnel their failures into [`Error`], which carries enough
//! context for API handlers to derive an HTTP status code via
//! [`Error::http_status`] and a caller-facing summary via
//! [`Error::summary`].

/// Unified error type covering all failure modes in clipfetch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data failed validation (missing or empty input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The supplied URL does not look like a supported video page, or the
    /// downloader rejected it.
    #[error("invalid or unsupported URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that was rejected.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An external tool (yt-dlp, ffmpeg) failed to spawn, timed out, or
    /// exited unsuccessfully.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// Failed to parse the output of an external tool.
    #[error("failed to parse {tool} output: {message}")]
    Parse {
        /// The tool whose output could not be parsed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// A single fallback provider failed to resolve a media URL.
    #[error("provider '{provider}' failed: {message}")]
    Provider {
        /// Name of the provider endpoint.
        provider: String,
        /// Human-readable error description.
        message: String,
    },

    /// Every fallback provider in the chain failed.
    #[error("all download providers failed; last error: {last}")]
    AllProvidersFailed {
        /// The error reported by the last provider tried.
        last: String,
    },

    /// An HTTP transfer failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::InvalidUrl { .. } => 400,
            Error::Tool { .. } => 500,
            Error::Parse { .. } => 500,
            Error::Provider { .. } => 500,
            Error::AllProvidersFailed { .. } => 500,
            Error::Http(_) => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short caller-facing summary used as the `error` field of JSON
    /// error bodies. The full message goes into `details`.
    pub fn summary(&self) -> &str {
        match self {
            Error::Validation(msg) => msg,
            Error::InvalidUrl { .. } => "Invalid or unsupported URL",
            Error::Tool { .. } | Error::Parse { .. } => "Failed to download video",
            Error::Provider { .. } | Error::AllProvidersFailed { .. } => {
                "Failed to download video"
            }
            Error::Http(_) => "Failed to download video",
            Error::Io { .. } | Error::Internal(_) => "Failed to process video request",
        }
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Parse`].
    pub fn parse(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Provider`].
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidUrl`].
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display() {
        let err = Error::Validation("URL is required".into());
        assert_eq!(err.to_string(), "Validation error: URL is required");
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.summary(), "URL is required");
    }

    #[test]
    fn invalid_url_display() {
        let err = Error::invalid_url("https://example.com", "not a TikTok URL");
        assert!(err.to_string().contains("https://example.com"));
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.summary(), "Invalid or unsupported URL");
    }

    #[test]
    fn tool_display() {
        let err = Error::tool("yt-dlp", "exit code 1");
        assert_eq!(err.to_string(), "Tool error [yt-dlp]: exit code 1");
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn provider_display() {
        let err = Error::provider("ssstik", "no download link in response");
        assert!(err.to_string().contains("ssstik"));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn all_providers_failed_carries_last() {
        let err = Error::AllProvidersFailed {
            last: "provider 'cdn-guess' failed: no video id".into(),
        };
        assert!(err.to_string().contains("cdn-guess"));
        assert_eq!(err.http_status(), 500);
        assert_eq!(err.summary(), "Failed to download video");
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
    }
}
