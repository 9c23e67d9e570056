//! Shared test harness for HTTP-level integration tests.
//!
//! Provides [`TestServer`], which builds a full [`AppContext`] from a
//! config and starts Axum on a random port, plus helpers for writing
//! stub downloader binaries.

#![allow(dead_code)]

use std::net::SocketAddr;

use clipfetch_core::config::Config;
use clipfetch_server::{build_router, AppContext};

/// A running server instance bound to a random local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Build the application from `config` and serve it on 127.0.0.1:0.
    pub async fn spawn(config: Config) -> Self {
        let ctx = AppContext::from_config(config).expect("failed to build app context");
        let app = build_router(ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    /// Spawn with an entirely default configuration.
    pub async fn spawn_default() -> Self {
        Self::spawn(Config::default()).await
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Stub external binaries, written as shell scripts. Unix only.
#[cfg(unix)]
pub mod stubs {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn write_script(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// A stub yt-dlp that answers `--dump-json` with canned metadata and
    /// otherwise writes a fixed payload to the path named by `-o`.
    pub fn working_ytdlp(dir: &Path) -> PathBuf {
        write_script(
            dir,
            "yt-dlp",
            r#"#!/bin/sh
for arg in "$@"; do
  if [ "$arg" = "--dump-json" ]; then
    echo '{"title":"stub clip","duration":12.0,"webpage_url":"https://www.tiktok.com/@u/video/1"}'
    exit 0
  fi
done
template=""
grab=0
for arg in "$@"; do
  if [ "$grab" = 1 ]; then template="$arg"; grab=0; fi
  if [ "$arg" = "-o" ]; then grab=1; fi
done
out=$(printf '%s' "$template" | sed 's/%(ext)s/mp4/')
printf 'stub-bytes' > "$out"
dirname "$out" > "$(dirname "$0")/last-staging"
"#,
        )
    }

    /// The staging directory recorded by the last [`working_ytdlp`] run.
    pub fn last_staging_dir(stub_dir: &Path) -> PathBuf {
        let recorded = std::fs::read_to_string(stub_dir.join("last-staging"))
            .expect("stub never ran a download");
        PathBuf::from(recorded.trim())
    }

    /// A stub yt-dlp that always fails, forcing the provider fallback.
    pub fn failing_ytdlp(dir: &Path) -> PathBuf {
        write_script(
            dir,
            "yt-dlp",
            "#!/bin/sh\necho 'ERROR: Unsupported URL' >&2\nexit 1\n",
        )
    }

    /// A stub ffmpeg that always fails, so enhancement never kicks in.
    pub fn failing_ffmpeg(dir: &Path) -> PathBuf {
        write_script(dir, "ffmpeg", "#!/bin/sh\nexit 1\n")
    }
}
