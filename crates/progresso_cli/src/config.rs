//! Configuration file support for progresso.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `PROGRESSO_`, e.g., `PROGRESSO_DATABASE_URL`)
//! 3. Config file (./progresso.toml, then ~/.config/progresso/config.toml)
//! 4. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/progresso/progresso.db` on Linux
//! (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/progresso/progresso.db"  # optional, this is the default
//!
//! [sources]
//! leetcode_url = "https://leetcode.com"
//! geeksforgeeks_url = "https://geeks-for-geeks-api.vercel.app"
//! codeforces_url = "https://codeforces.com/api"
//! timeout_secs = 30
//!
//! [leetcode]
//! recent_limit = 20
//!
//! [codeforces]
//! page_size = 200
//! page_delay_ms = 2500
//! dedup = "problem_name"  # or "problem_id"
//!
//! [sync]
//! min_interval_secs = 0  # 0 syncs on every read
//!
//! [server]
//! bind = "127.0.0.1:3000"
//! ```
//!
//! Environment variables split on `_`, so only single-word keys such as
//! `PROGRESSO_DATABASE_URL` or `PROGRESSO_SERVER_BIND` can be set that way.

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

use progresso::ServiceOptions;
use progresso::codeforces::{
    CODEFORCES_API_URL, CodeforcesDedup, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE,
};
use progresso::geeksforgeeks::GEEKSFORGEEKS_API_URL;
use progresso::leetcode::{DEFAULT_RECENT_LIMIT, LEETCODE_URL};
use progresso::sync::{DEFAULT_TIMEOUT, SourceOptions};

/// Default address for `progresso serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Source endpoints and request timeout.
    pub sources: SourcesConfig,
    pub leetcode: LeetCodeConfig,
    pub codeforces: CodeforcesConfig,
    /// Read-path sync options.
    pub sync: SyncConfig,
    pub server: ServerConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    /// Defaults to `sqlite://~/.local/state/progresso/progresso.db` if not specified.
    pub url: Option<String>,
}

/// Base URLs of the three sources.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub leetcode_url: String,
    pub geeksforgeeks_url: String,
    pub codeforces_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            leetcode_url: LEETCODE_URL.to_string(),
            geeksforgeeks_url: GEEKSFORGEEKS_API_URL.to_string(),
            codeforces_url: CODEFORCES_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LeetCodeConfig {
    /// How many recent submissions to request.
    pub recent_limit: u32,
}

impl Default for LeetCodeConfig {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CodeforcesConfig {
    pub page_size: u32,
    /// Pause between page requests, in milliseconds.
    pub page_delay_ms: u64,
    /// What counts as the same problem.
    pub dedup: CodeforcesDedup,
}

impl Default for CodeforcesConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_delay_ms: u64::try_from(DEFAULT_PAGE_DELAY.as_millis()).unwrap_or(u64::MAX),
            dedup: CodeforcesDedup::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Skip the sync on read when the user's last sync is this recent.
    pub min_interval_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the read endpoint listens on.
    pub bind: Option<String>,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/progresso/config.toml)
    /// 3. Local config file (./progresso.toml)
    /// 4. Environment variables with PROGRESSO_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("progresso.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./progresso.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., PROGRESSO_DATABASE_URL -> database.url
        builder = builder.add_source(
            Environment::with_prefix("PROGRESSO")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter creates the SQLite file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("progresso.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Adapter options for the sync engine.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            leetcode_url: self.sources.leetcode_url.clone(),
            geeksforgeeks_url: self.sources.geeksforgeeks_url.clone(),
            codeforces_url: self.sources.codeforces_url.clone(),
            timeout: StdDuration::from_secs(self.sources.timeout_secs),
            leetcode_recent_limit: self.leetcode.recent_limit,
            codeforces_page_size: self.codeforces.page_size,
            codeforces_page_delay: StdDuration::from_millis(self.codeforces.page_delay_ms),
            codeforces_dedup: self.codeforces.dedup,
        }
    }

    pub fn service_options(&self) -> ServiceOptions {
        let secs = i64::try_from(self.sync.min_interval_secs).unwrap_or(i64::MAX);
        ServiceOptions {
            min_sync_interval: chrono::Duration::try_seconds(secs)
                .unwrap_or_else(chrono::Duration::zero),
        }
    }

    pub fn server_bind(&self) -> String {
        self.server
            .bind
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "progresso").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/progresso` or `~/.local/state/progresso`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "progresso").map(|dirs| {
            // state_dir() returns None on macOS/Windows
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}
