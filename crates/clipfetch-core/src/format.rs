//! Caller-facing media format selection.

use serde::{Deserialize, Serialize};

/// The output format requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaFormat {
    /// The video as the site serves it.
    Video,
    /// Audio track only, extracted to MP3.
    Audio,
    /// Watermark-free source, upscaled and sharpened by ffmpeg.
    NoWatermark,
}

impl MediaFormat {
    /// MIME type of the response body for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaFormat::Audio => "audio/mpeg",
            MediaFormat::Video | MediaFormat::NoWatermark => "video/mp4",
        }
    }

    /// File extension produced by the download pipeline.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaFormat::Audio => "mp3",
            MediaFormat::Video | MediaFormat::NoWatermark => "mp4",
        }
    }

    /// Short tag used in generated filenames.
    pub fn tag(&self) -> &'static str {
        match self {
            MediaFormat::Video => "video",
            MediaFormat::Audio => "audio",
            MediaFormat::NoWatermark => "no-watermark",
        }
    }
}

impl Default for MediaFormat {
    fn default() -> Self {
        MediaFormat::Video
    }
}

impl std::str::FromStr for MediaFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "video" => Ok(MediaFormat::Video),
            "audio" => Ok(MediaFormat::Audio),
            // "hd" is the legacy alias some clients still send.
            "no-watermark" | "hd" => Ok(MediaFormat::NoWatermark),
            other => Err(crate::Error::Validation(format!(
                "unknown format '{other}' (expected video, audio, or no-watermark)"
            ))),
        }
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!("video".parse::<MediaFormat>().unwrap(), MediaFormat::Video);
        assert_eq!("audio".parse::<MediaFormat>().unwrap(), MediaFormat::Audio);
        assert_eq!(
            "no-watermark".parse::<MediaFormat>().unwrap(),
            MediaFormat::NoWatermark
        );
        assert_eq!("hd".parse::<MediaFormat>().unwrap(), MediaFormat::NoWatermark);
        assert_eq!("AUDIO".parse::<MediaFormat>().unwrap(), MediaFormat::Audio);
    }

    #[test]
    fn parse_unknown_format_is_client_error() {
        let err = "gif".parse::<MediaFormat>().unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn content_types() {
        assert_eq!(MediaFormat::Audio.content_type(), "audio/mpeg");
        assert_eq!(MediaFormat::Video.content_type(), "video/mp4");
        assert_eq!(MediaFormat::NoWatermark.content_type(), "video/mp4");
    }

    #[test]
    fn extensions() {
        assert_eq!(MediaFormat::Audio.extension(), "mp3");
        assert_eq!(MediaFormat::Video.extension(), "mp4");
    }
}
