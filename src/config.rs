//! Server configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables. The CLI applies its own flags last.
//!
//! ```toml
//! [server]
//! port = 5000
//! store_url = "file:///var/lib/todos/tasks.json"
//! allowed_origins = ["http://localhost:3000"]
//! workers = 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default number of request worker threads
pub const DEFAULT_WORKERS: usize = 4;

/// Environment variable holding the listening port
pub const ENV_PORT: &str = "PORT";

/// Environment variable holding the store URL
pub const ENV_STORE_URL: &str = "STORE_URL";

/// Environment variable holding comma-separated allowed origins
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";

/// Environment variable holding the worker count
pub const ENV_WORKERS: &str = "TODOS_WORKERS";

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on
    pub port: u16,
    /// Store URL (`memory://`, `file://<path>` or a bare path)
    pub store_url: String,
    /// Origins allowed to make cross-origin requests (`*` allows any)
    pub allowed_origins: Vec<String>,
    /// Number of request worker threads
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store_url: default_store_url(),
            allowed_origins: Vec::new(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// TOML file layout; every key is optional
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    port: Option<u16>,
    store_url: Option<String>,
    allowed_origins: Option<Vec<String>>,
    workers: Option<usize>,
}

/// Default store location: `<data dir>/todos/tasks.json`
#[must_use]
pub fn default_store_url() -> String {
    let path = dirs::data_dir()
        .map_or_else(|| PathBuf::from("todos.json"), |dir| dir.join("todos").join("tasks.json"));
    format!("file://{}", path.display())
}

/// Split a comma-separated origin list, dropping blanks
#[must_use]
pub fn parse_origins(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

impl ServerConfig {
    /// Resolve defaults, the optional file and the process environment
    pub fn resolve(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(path) = file {
            config.apply_file(path)?;
        }
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from a TOML file
    pub fn apply_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        self.apply_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Overlay values from TOML text
    pub fn apply_toml(&mut self, content: &str) -> anyhow::Result<()> {
        let file: ConfigFile = toml::from_str(content)?;
        let section = file.server;

        if let Some(port) = section.port {
            self.port = port;
        }
        if let Some(url) = section.store_url {
            self.store_url = url;
        }
        if let Some(origins) = section.allowed_origins {
            self.allowed_origins = origins;
        }
        if let Some(workers) = section.workers {
            self.workers = workers;
        }
        Ok(())
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment-like lookup
    pub fn apply_lookup<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
        }
        if let Some(url) = lookup(ENV_STORE_URL).filter(|u| !u.trim().is_empty()) {
            self.store_url = url.trim().to_string();
        }
        if let Some(origins) = lookup(ENV_ALLOWED_ORIGINS) {
            self.allowed_origins = parse_origins(&origins);
        }
        if let Some(workers) = lookup(ENV_WORKERS) {
            self.workers = workers
                .trim()
                .parse()
                .with_context(|| format!("{ENV_WORKERS} must be a number, got '{workers}'"))?;
        }
        Ok(())
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if self.store_url.trim().is_empty() {
            anyhow::bail!("store URL cannot be empty");
        }
        Ok(())
    }

    /// Address to bind the listener to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
