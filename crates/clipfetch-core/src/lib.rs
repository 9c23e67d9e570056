//! clipfetch-core: shared types, errors, configuration, and media formats.
//!
//! This crate is the foundational dependency for the other clipfetch
//! crates, providing the unified error type, application configuration,
//! and the caller-facing media format enum.

pub mod config;
pub mod error;
pub mod format;

// Re-export the most commonly used items at the crate root.
pub use config::Config;
pub use error::{Error, Result};
pub use format::MediaFormat;
