mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use clipfetch_core::{config, MediaFormat};
use clipfetch_dl::{Fetcher, ToolRegistry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "clipfetch=trace,clipfetch_core=trace,clipfetch_dl=trace,clipfetch_server=trace,tower_http=debug"
                .to_string()
        } else {
            "clipfetch=debug,clipfetch_core=debug,clipfetch_dl=debug,clipfetch_server=debug,tower_http=info"
                .to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Fetch {
            url,
            format,
            output,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fetch_url(&url, &format, output, cli.config.as_deref()))
        }
        Commands::Probe { url, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(probe_url(&url, json, cli.config.as_deref()))
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("clipfetch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn start_server(host: String, port: u16, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::Config::load_or_default(config_path);

    // Host/port from the CLI win over the config file
    config.server.host = host;
    config.server.port = port;

    tracing::info!("Starting clipfetch server");
    clipfetch_server::start(config).await?;
    Ok(())
}

fn build_fetcher(config_path: Option<&Path>) -> Result<Fetcher> {
    let config = config::Config::load_or_default(config_path);
    let registry = Arc::new(ToolRegistry::discover(&config.tools));
    Ok(Fetcher::new(&config, registry)?)
}

async fn fetch_url(
    url: &str,
    format: &str,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let format: MediaFormat = format.parse()?;
    let fetcher = build_fetcher(config_path)?;

    tracing::info!("Downloading {url} as {format}");
    let media = fetcher.fetch(url, format).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(&media.filename));
    tokio::fs::write(&path, &media.bytes).await?;
    println!("Wrote {} bytes to {}", media.bytes.len(), path.display());
    Ok(())
}

async fn probe_url(url: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let fetcher = build_fetcher(config_path)?;
    let info = fetcher.validate(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:    {}", info.title.as_deref().unwrap_or("(unknown)"));
        if let Some(duration) = info.duration {
            println!("Duration: {duration:.1}s");
        }
        if let Some(ref page) = info.webpage_url {
            println!("Page:     {page}");
        }
        if let Some(ref uploader) = info.uploader {
            println!("Uploader: {uploader}");
        }
    }
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::Config::load_or_default(config_path);
    let registry = ToolRegistry::discover(&config.tools);

    let mut missing = false;
    for tool in registry.check_all() {
        if tool.available {
            let version = tool.version.as_deref().unwrap_or("unknown version");
            let path = tool
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!("✓ {} ({version}) at {path}", tool.name);
        } else {
            println!("✗ {} not found", tool.name);
            missing = true;
        }
    }

    if missing {
        println!("\nSome tools are missing. Downloads will fall back to third-party endpoints.");
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    // Parse strictly here so syntax errors fail the command instead of
    // silently falling back to defaults like the server does.
    let config = match path {
        Some(p) => {
            let contents = std::fs::read_to_string(p)?;
            config::Config::from_toml(&contents)?
        }
        None => config::Config::load_or_default(None),
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid.");
    } else {
        println!("Configuration loaded with warnings:");
        for warning in &warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
