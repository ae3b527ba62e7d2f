//! CLI definitions and entry point

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use todos::config::ServerConfig;
use todos::server::{self, AppState, CorsPolicy};
use todos::storage;

/// todos - task-tracking backend
#[derive(Parser, Debug)]
#[command(
    name = "todos",
    version,
    about = "Task-tracking backend serving a JSON HTTP API",
    long_about = "Serve create, list, filter, update and delete operations on tasks\n\
                  under /api/todos, backed by an in-memory or JSON file store."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Store URL: memory://, file://<path> or a path (overrides STORE_URL)
        #[arg(short, long)]
        store: Option<String>,

        /// Number of request worker threads
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Print the resolved configuration
    Config {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Some(Command::Serve {
            config,
            port,
            store,
            workers,
        }) => {
            let mut resolved = ServerConfig::resolve(config.as_deref())?;
            if let Some(port) = port {
                resolved.port = port;
            }
            if let Some(store) = store {
                resolved.store_url = store;
            }
            if let Some(workers) = workers {
                resolved.workers = workers;
            }
            resolved.validate()?;
            serve(&resolved)
        },
        Some(Command::Config { config }) => show_config(config.as_deref(), cli.json),
        Some(Command::Version) => {
            if cli.json {
                println!("{}", serde_json::json!({ "version": todos::VERSION }));
            } else {
                println!("todos v{}", todos::VERSION);
            }
            Ok(())
        },
        None => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": todos::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("todos v{}", todos::VERSION);
                println!("\nRun 'todos --help' for usage");
                println!("Run 'todos serve' to start the API server");
            }
            Ok(())
        },
    }
}

/// Open the store and serve until the process is stopped
fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let store = storage::open(&config.store_url)
        .map_err(|e| anyhow::anyhow!("Failed to open store '{}': {e}", config.store_url))?;
    let state = AppState::new(store, CorsPolicy::new(config.allowed_origins.clone()));
    if state.cors.is_enabled() {
        log::info!("Cross-origin requests allowed from: {}", config.allowed_origins.join(", "));
    }

    let listener = server::bind(&config.bind_addr())?;

    log::info!(
        "Serving {} on port {} (store: {}, workers: {})",
        server::BASE_PATH,
        config.port,
        config.store_url,
        config.workers
    );
    println!("Listening on http://localhost:{}{}", config.port, server::BASE_PATH);
    println!("Press Ctrl+C to stop");

    server::serve(listener, &state, config.workers)
}

fn show_config(file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = ServerConfig::resolve(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let origins = if config.allowed_origins.is_empty() {
        "(none)".to_string()
    } else {
        config.allowed_origins.join(", ")
    };

    println!("{}        {}", "port:".bold(), config.port);
    println!("{}       {}", "store:".bold(), config.store_url);
    println!("{}     {}", "origins:".bold(), origins);
    println!("{}     {}", "workers:".bold(), config.workers);
    Ok(())
}
