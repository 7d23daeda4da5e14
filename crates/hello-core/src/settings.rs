//! Server settings
//!
//! Settings live in an optional plain JSON file. Missing files and missing
//! keys fall back to the defaults; command-line flags override both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{HelloError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8181;

/// Transport the server listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// HTTP with Server-Sent Events
    #[default]
    Sse,
    /// Newline-delimited JSON over stdin/stdout
    Stdio,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Sse => write!(f, "sse"),
            TransportKind::Stdio => write!(f, "stdio"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = HelloError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sse" => Ok(TransportKind::Sse),
            "stdio" => Ok(TransportKind::Stdio),
            other => Err(HelloError::InvalidSettings(format!(
                "unknown transport '{}' (expected 'sse' or 'stdio')",
                other
            ))),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Interface the SSE transport binds to
    pub host: String,
    /// Port for the SSE transport
    pub port: u16,
    /// Transport to serve
    pub transport: TransportKind,
    /// Prefix tool output with `DEBUG:` and log verbosely
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            transport: TransportKind::default(),
            debug: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Default settings file location (`settings.json` in the platform config dir)
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "hello-mcp")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Address the SSE transport binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
