//! Response filename construction.
//!
//! Titles come straight from video-hosting sites and are full of emoji
//! and filesystem-hostile characters; everything here is about turning
//! them into a safe `Content-Disposition` filename.

use clipfetch_core::MediaFormat;

/// Stem used when a title is unknown or sanitizes down to nothing.
const FALLBACK_STEM: &str = "tiktok-video";

/// Strip non-ASCII and control characters, replace filesystem specials
/// with `_`, and trim. Titles shorter than three characters after cleanup
/// fall back to a generic stem.
///
/// Control characters must go: a newline in a header value makes the
/// header unbuildable and would fail an otherwise successful download.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.len() < 3 {
        FALLBACK_STEM.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Build the attachment filename for a download response.
///
/// With a known title: `<title>-enhanced-HD.mp4` for watermark-free
/// output, `<title>-<format>.<ext>` otherwise. Without one:
/// `tiktok-<format>.<ext>`.
pub fn attachment_name(title: Option<&str>, format: MediaFormat, extension: &str) -> String {
    match title {
        Some(title) => {
            let stem = sanitize_title(title);
            match format {
                MediaFormat::NoWatermark => format!("{stem}-enhanced-HD.mp4"),
                other => format!("{stem}-{}.{extension}", other.tag()),
            }
        }
        None => format!("tiktok-{}.{extension}", format.tag()),
    }
}
