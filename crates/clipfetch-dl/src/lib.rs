//! # clipfetch-dl
//!
//! External tool management and the download pipeline for clipfetch.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to
//!   yt-dlp and ffmpeg.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Staging directories** ([`StagingDir`]) -- per-request temporary
//!   directory lifecycle; nothing leaks past the request.
//! - **yt-dlp invocation** ([`ytdlp`]) -- metadata probing and format-aware
//!   downloading.
//! - **ffmpeg enhancement** ([`enhance`]) -- best-effort upscale/sharpen
//!   pass for watermark-free output.
//! - **Fallback providers** ([`providers`]) -- ordered chain of third-party
//!   resolver endpoints tried when yt-dlp is unavailable or fails.
//! - **Orchestration** ([`Fetcher`]) -- ties the above into
//!   validate/download entry points used by the server and CLI.

pub mod command;
pub mod download;
pub mod enhance;
pub mod fetch;
pub mod filename;
pub mod providers;
pub mod staging;
pub mod tools;
pub mod ytdlp;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use fetch::{FetchedMedia, Fetcher};
pub use providers::{default_providers, Provider};
pub use staging::StagingDir;
pub use tools::{ToolConfig, ToolInfo, ToolRegistry, FFMPEG, YTDLP};
pub use ytdlp::VideoInfo;
