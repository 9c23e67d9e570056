//! Shared application context.

use std::sync::Arc;

use clipfetch_core::config::Config;
use clipfetch_dl::{Fetcher, ToolRegistry};

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// External tool registry (yt-dlp, ffmpeg).
    pub tools: Arc<ToolRegistry>,
    /// Download orchestrator.
    pub fetcher: Arc<Fetcher>,
}

impl AppContext {
    /// Build a context from configuration: discover tools and construct
    /// the fetcher.
    pub fn from_config(config: Config) -> clipfetch_core::Result<Self> {
        let tools = Arc::new(ToolRegistry::discover(&config.tools));
        let fetcher = Arc::new(Fetcher::new(&config, tools.clone())?);
        Ok(Self {
            config: Arc::new(config),
            tools,
            fetcher,
        })
    }
}
