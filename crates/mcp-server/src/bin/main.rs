//! Hello MCP server binary
//!
//! Serves the `hello` tool, the `history://hello-world` resource and the
//! `greet` prompt over HTTP/SSE (default) or stdio.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hello_core::{Settings, TransportKind};
use mcp_server::{McpServer, ServerMode};

/// Hello MCP - minimal Model Context Protocol example server
#[derive(Parser, Debug)]
#[command(name = "hello-mcp-server")]
#[command(version)]
#[command(about = "Hello MCP - a minimal MCP server with one tool, one resource and one prompt")]
struct Args {
    /// Port to listen on (sse transport, default: 8181)
    #[arg(long, env = "HELLO_MCP_PORT")]
    port: Option<u16>,

    /// Transport to serve: sse or stdio (default: sse)
    #[arg(long, env = "HELLO_MCP_TRANSPORT")]
    transport: Option<TransportKind>,

    /// Enable debug mode (prefixes tool output with "DEBUG:")
    #[arg(long, env = "HELLO_MCP_DEBUG")]
    debug: bool,

    /// Interface to bind (sse transport, default: 127.0.0.1)
    #[arg(long, env = "HELLO_MCP_HOST")]
    host: Option<String>,

    /// Path to a JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Resolve settings: flags and env over the settings file over defaults
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match self.config.clone().or_else(Settings::default_path) {
            Some(path) => Settings::load(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(transport) = self.transport {
            settings.transport = transport;
        }
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if self.debug {
            settings.debug = true;
        }

        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;

    // Logs always go to stderr so they never corrupt the stdio protocol stream
    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = McpServer::new(&settings);

    match server.mode() {
        ServerMode::Stdio => info!("Starting Hello MCP server on stdio"),
        ServerMode::Sse { host, port } => {
            info!("Starting Hello MCP server on http://{}:{}", host, port)
        }
    }
    info!(
        "Debug mode: {}",
        if settings.debug { "enabled" } else { "disabled" }
    );

    let transport = settings.transport;
    server
        .run()
        .await
        .with_context(|| format!("{} transport failed", transport))?;

    info!("Server stopped");

    // A pending stdin read sits on a blocking thread that cannot be cancelled,
    // and dropping the runtime would wait on it
    if transport == TransportKind::Stdio {
        std::process::exit(0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["hello-mcp-server", "--config", "/nonexistent/hello.json"])
            .unwrap();
        let settings = args.settings().unwrap();

        assert_eq!(settings.port, 8181);
        assert_eq!(settings.transport, TransportKind::Sse);
    }

    #[test]
    fn test_args_override_settings() {
        let args = Args::try_parse_from([
            "hello-mcp-server",
            "--config",
            "/nonexistent/hello.json",
            "--port",
            "9090",
            "--transport",
            "stdio",
            "--debug",
        ])
        .unwrap();
        let settings = args.settings().unwrap();

        assert_eq!(settings.port, 9090);
        assert_eq!(settings.transport, TransportKind::Stdio);
        assert!(settings.debug);
    }

    #[test]
    fn test_args_reject_unknown_transport() {
        assert!(Args::try_parse_from(["hello-mcp-server", "--transport", "websocket"]).is_err());
    }
}
