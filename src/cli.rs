use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipfetch")]
#[command(author, version, about = "TikTok video download service")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Download a single video to a local file
    Fetch {
        /// Video URL to download
        #[arg(required = true)]
        url: String,

        /// Output format: video, audio, or no-watermark
        #[arg(short, long, default_value = "video")]
        format: String,

        /// Output path (defaults to the generated filename in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Probe a video URL and display its metadata
    Probe {
        /// Video URL to probe
        #[arg(required = true)]
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
