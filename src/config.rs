//! Command line and environment configuration, plus logging setup.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::source::{DEFAULT_TIMEOUT, DEFAULT_USERS_URL};

pub const THEME_FILE: &str = "theme.conf";
pub const KEYBINDS_FILE: &str = "keybinds.conf";

/// Searchable, sortable table of users fetched from a REST endpoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "userdata-tui", version, about)]
pub struct Cli {
    /// Endpoint returning a JSON array of users
    #[arg(long, env = "USERDATA_URL", default_value = DEFAULT_USERS_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, env = "USERDATA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Directory holding theme.conf and keybinds.conf
    #[arg(long, env = "USERDATA_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, env = "USERDATA_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn theme_path(&self) -> PathBuf {
        crate::app::config_file_path(&self.config_dir, THEME_FILE)
    }

    pub fn keybinds_path(&self) -> PathBuf {
        crate::app::config_file_path(&self.config_dir, KEYBINDS_FILE)
    }
}

/// Install the tracing subscriber. Without a log file nothing is recorded.
pub fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;

    let level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}
