//! Third-party resolver providers, tried in order when yt-dlp is
//! unavailable or fails.
//!
//! Each provider implements [`Provider::resolve`]: given a video page URL
//! and a format, return a direct media URL. How a provider gets there
//! (form POST plus HTML scrape, JSON API, or a plain URL guess) is its
//! own business; the chain in [`resolve_first`] only cares about the
//! `Result`. These endpoints are brittle scraping sites, so base URLs are
//! configurable and every regex lives next to the provider that owns it.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use clipfetch_core::config::ProvidersConfig;
use clipfetch_core::{Error, MediaFormat, Result};

/// One strategy for resolving a page URL into a direct media URL.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Resolve a direct media URL for the given page URL and format.
    async fn resolve(&self, client: &Client, url: &str, format: MediaFormat) -> Result<String>;
}

/// Build the default provider chain in priority order.
pub fn default_providers(config: &ProvidersConfig) -> Vec<Box<dyn Provider>> {
    vec![
        Box::new(SsstikProvider::new(&config.ssstik_url)),
        Box::new(SnaptikProvider::new(&config.snaptik_url)),
        Box::new(CdnGuessProvider::new(&config.cdn_guess_url)),
    ]
}

/// Try each provider in order, returning the first successful media URL.
///
/// Failures are logged per provider; when every provider fails, the last
/// error is surfaced inside [`Error::AllProvidersFailed`].
pub async fn resolve_first(
    providers: &[Box<dyn Provider>],
    client: &Client,
    url: &str,
    format: MediaFormat,
) -> Result<String> {
    let mut last_error = String::from("no providers configured");

    for provider in providers {
        tracing::info!(provider = provider.name(), "Trying fallback provider");
        match provider.resolve(client, url, format).await {
            Ok(media_url) => {
                tracing::info!(provider = provider.name(), "Provider resolved a media URL");
                return Ok(media_url);
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), "Provider failed: {e}");
                last_error = e.to_string();
            }
        }
    }

    Err(Error::AllProvidersFailed { last: last_error })
}

// ---------------------------------------------------------------------------
// ssstik
// ---------------------------------------------------------------------------

/// ssstik.io: form POST, download links scraped out of the returned HTML.
pub struct SsstikProvider {
    base_url: String,
    audio_link: Regex,
    no_watermark_link: Regex,
    video_link: Regex,
}

impl SsstikProvider {
    pub fn new(base_url: &str) -> Self {
        // The download buttons are distinguished only by their class list;
        // the trailing quote keeps `without_watermark` from also matching
        // `without_watermark_audio`.
        let button = |class: &str| {
            Regex::new(&format!(
                r#"href="([^"]*)" class="pure-button pure-button-primary is-center u-bl dl-button download_link {class}""#
            ))
            .expect("static regex compiles")
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            audio_link: button("without_watermark_audio"),
            no_watermark_link: button("without_watermark"),
            video_link: button("with_watermark"),
        }
    }

    fn link_pattern(&self, format: MediaFormat) -> &Regex {
        match format {
            MediaFormat::Audio => &self.audio_link,
            MediaFormat::NoWatermark => &self.no_watermark_link,
            MediaFormat::Video => &self.video_link,
        }
    }

    fn extract(&self, body: &str, format: MediaFormat) -> Option<String> {
        self.link_pattern(format)
            .captures(body)
            .map(|c| c[1].to_string())
    }
}

#[async_trait]
impl Provider for SsstikProvider {
    fn name(&self) -> &'static str {
        "ssstik"
    }

    async fn resolve(&self, client: &Client, url: &str, format: MediaFormat) -> Result<String> {
        let response = client
            .post(format!("{}/abc?url=dl", self.base_url))
            .header("Origin", &self.base_url)
            .header("Referer", format!("{}/en", self.base_url))
            .form(&[("id", url), ("locale", "en"), ("tt", "azW54a")])
            .send()
            .await
            .map_err(|e| Error::provider("ssstik", format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::provider(
                "ssstik",
                format!("unexpected status {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::provider("ssstik", format!("failed to read body: {e}")))?;

        self.extract(&body, format)
            .ok_or_else(|| Error::provider("ssstik", "no download link in response"))
    }
}

// ---------------------------------------------------------------------------
// snaptik
// ---------------------------------------------------------------------------

/// snaptik.app: form POST, one download button regardless of format.
pub struct SnaptikProvider {
    base_url: String,
    link: Regex,
}

impl SnaptikProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            link: Regex::new(r#"href="([^"]*)" class="abutton is-success is-fullwidth""#)
                .expect("static regex compiles"),
        }
    }

    fn extract(&self, body: &str) -> Option<String> {
        self.link.captures(body).map(|c| c[1].to_string())
    }
}

#[async_trait]
impl Provider for SnaptikProvider {
    fn name(&self) -> &'static str {
        "snaptik"
    }

    async fn resolve(&self, client: &Client, url: &str, _format: MediaFormat) -> Result<String> {
        let response = client
            .post(format!("{}/abc.php", self.base_url))
            .form(&[("url", url)])
            .send()
            .await
            .map_err(|e| Error::provider("snaptik", format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::provider(
                "snaptik",
                format!("unexpected status {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::provider("snaptik", format!("failed to read body: {e}")))?;

        self.extract(&body)
            .ok_or_else(|| Error::provider("snaptik", "no download link in response"))
    }
}

// ---------------------------------------------------------------------------
// CDN guess
// ---------------------------------------------------------------------------

/// Last resort: construct a CDN-style media URL from the numeric video id
/// in the page URL. No request is made here; if the guess is wrong, the
/// download step fails and the request errors out.
pub struct CdnGuessProvider {
    base_url: String,
    video_id: Regex,
}

impl CdnGuessProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            video_id: Regex::new(r"video/(\d+)").expect("static regex compiles"),
        }
    }

    fn extract_id(&self, url: &str) -> Option<String> {
        self.video_id.captures(url).map(|c| c[1].to_string())
    }
}

#[async_trait]
impl Provider for CdnGuessProvider {
    fn name(&self) -> &'static str {
        "cdn-guess"
    }

    async fn resolve(&self, _client: &Client, url: &str, format: MediaFormat) -> Result<String> {
        let id = self.extract_id(url).ok_or_else(|| {
            Error::provider("cdn-guess", "URL contains no numeric video id")
        })?;

        let guessed = match format {
            MediaFormat::Audio => format!("{}/video/media/music/{id}.mp3", self.base_url),
            MediaFormat::NoWatermark => format!("{}/video/media/play/{id}.mp4", self.base_url),
            MediaFormat::Video => format!("{}/video/media/wmplay/{id}.mp4", self.base_url),
        };

        Ok(guessed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SSSTIK_HTML: &str = concat!(
        r#"<div><a href="https://cdn.example/video-nowm.mp4" class="pure-button pure-button-primary is-center u-bl dl-button download_link without_watermark" rel="nofollow">Without watermark</a>"#,
        r#"<a href="https://cdn.example/audio.mp3" class="pure-button pure-button-primary is-center u-bl dl-button download_link without_watermark_audio" rel="nofollow">MP3</a>"#,
        r#"<a href="https://cdn.example/video-wm.mp4" class="pure-button pure-button-primary is-center u-bl dl-button download_link with_watermark" rel="nofollow">With watermark</a></div>"#,
    );

    #[test]
    fn ssstik_extracts_per_format_links() {
        let provider = SsstikProvider::new("https://ssstik.io");
        assert_eq!(
            provider.extract(SSSTIK_HTML, MediaFormat::NoWatermark).unwrap(),
            "https://cdn.example/video-nowm.mp4"
        );
        assert_eq!(
            provider.extract(SSSTIK_HTML, MediaFormat::Audio).unwrap(),
            "https://cdn.example/audio.mp3"
        );
        assert_eq!(
            provider.extract(SSSTIK_HTML, MediaFormat::Video).unwrap(),
            "https://cdn.example/video-wm.mp4"
        );
    }

    #[test]
    fn ssstik_returns_none_on_unrelated_html() {
        let provider = SsstikProvider::new("https://ssstik.io");
        assert!(provider.extract("<html>rate limited</html>", MediaFormat::Video).is_none());
    }

    #[test]
    fn snaptik_extracts_download_button() {
        let provider = SnaptikProvider::new("https://snaptik.app");
        let html = r#"<a href="https://cdn.example/file.mp4" class="abutton is-success is-fullwidth">Download</a>"#;
        assert_eq!(provider.extract(html).unwrap(), "https://cdn.example/file.mp4");
    }

    #[test]
    fn cdn_guess_builds_urls_from_video_id() {
        let provider = CdnGuessProvider::new("https://www.tikwm.com");
        let url = "https://www.tiktok.com/@user/video/7219543201/";
        assert_eq!(
            provider.extract_id(url).unwrap(),
            "7219543201"
        );
    }

    #[tokio::test]
    async fn cdn_guess_resolves_without_network() {
        let provider = CdnGuessProvider::new("https://www.tikwm.com");
        let client = Client::new();
        let resolved = provider
            .resolve(
                &client,
                "https://www.tiktok.com/@user/video/42",
                MediaFormat::Audio,
            )
            .await
            .unwrap();
        assert_eq!(resolved, "https://www.tikwm.com/video/media/music/42.mp3");
    }

    #[tokio::test]
    async fn cdn_guess_rejects_urls_without_id() {
        let provider = CdnGuessProvider::new("https://www.tikwm.com");
        let client = Client::new();
        let err = provider
            .resolve(&client, "https://vm.tiktok.com/short", MediaFormat::Video)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("video id"));
    }

    #[tokio::test]
    async fn resolve_first_surfaces_last_error_when_all_fail() {
        let providers: Vec<Box<dyn Provider>> =
            vec![Box::new(CdnGuessProvider::new("https://www.tikwm.com"))];
        let client = Client::new();
        let err = resolve_first(&providers, &client, "https://vm.tiktok.com/x", MediaFormat::Video)
            .await
            .unwrap_err();
        match err {
            Error::AllProvidersFailed { last } => assert!(last.contains("cdn-guess")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_chain_order() {
        let providers = default_providers(&ProvidersConfig::default());
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["ssstik", "snaptik", "cdn-guess"]);
    }
}
