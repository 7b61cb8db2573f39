//! Progresso CLI - sync and serve solved-problem history.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::OutputFormat;

#[derive(Parser)]
#[command(name = "progresso")]
#[command(version)]
#[command(about = "Solved-problem history across coding platforms")]
#[command(
    long_about = "Progresso collects the problems a user has solved on LeetCode, GeeksforGeeks, \
and Codeforces into one local database. Each read syncs the user's linked profiles first, \
then serves every stored problem, newest solve first."
)]
#[command(after_long_help = r#"EXAMPLES
    Link a user's profiles:
        $ progresso profile set user-1 --leetcode-url https://leetcode.com/u/alice/ --codeforces tourist

    Sync a user now:
        $ progresso sync user-1

    List stored problems without syncing:
        $ progresso problems user-1 --no-sync

    Serve the read endpoint:
        $ progresso serve --bind 127.0.0.1:3000

    Generate shell completions:
        $ progresso completions bash > ~/.local/share/bash-completion/completions/progresso

CONFIGURATION
    Progresso reads configuration from:
      1. ~/.config/progresso/config.toml (or $XDG_CONFIG_HOME/progresso/config.toml)
      2. ./progresso.toml
      3. Environment variables (PROGRESSO_* prefix, e.g., PROGRESSO_DATABASE_URL)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    PROGRESSO_DATABASE_URL    Database connection string (default: ~/.local/state/progresso/progresso.db)
    PROGRESSO_SERVER_BIND     Address for `progresso serve` (default: 127.0.0.1:3000)
    RUST_LOG                  Log filter (default: progresso=info,progresso_cli=info)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage a user's linked platform profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Sync a user's solved problems from every linked platform
    Sync {
        /// User ID to sync
        user_id: String,

        /// Output format for the sync summary
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// List a user's solved problems, syncing first
    Problems {
        /// User ID to list
        user_id: String,

        /// Serve stored rows without syncing
        #[arg(long)]
        no_sync: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Serve the HTTP read endpoint
    Serve {
        /// Address to listen on (overrides [server] bind)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Link platform identities to a user, replacing any stored links
    Set {
        /// User ID
        user_id: String,

        /// Full LeetCode profile URL
        #[arg(long)]
        leetcode_url: Option<String>,

        /// GeeksforGeeks username
        #[arg(long = "geeksforgeeks", visible_alias = "gfg")]
        geeksforgeeks_username: Option<String>,

        /// Codeforces handle
        #[arg(long = "codeforces")]
        codeforces_handle: Option<String>,
    },
    /// Show a user's linked identities
    Show {
        /// User ID
        user_id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("progresso=info,progresso_cli=info"),
    };

    // Logs go to stderr so table and JSON output stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    let cli = Cli::parse();

    // Handle commands that don't require database access first
    match &cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(*shell)?;
            return Ok(());
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output.clone())?;
            return Ok(());
        }
        _ => {}
    }

    let database_url = config
        .database_url()
        .ok_or("Could not determine a database URL; set PROGRESSO_DATABASE_URL")?;

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if db_path.is_relative() && !db_path.as_os_str().is_empty() {
            tracing::warn!(
                "Database path '{}' is relative - behavior depends on current directory. \
                 Consider using an absolute path.",
                db_path.display()
            );
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
    }

    match cli.command {
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        Commands::Profile { action } => {
            commands::profile::handle_profile(action, &database_url).await?;
        }
        Commands::Sync { user_id, output } => {
            commands::sync::handle_sync(&user_id, output, &config, &database_url).await?;
        }
        Commands::Problems {
            user_id,
            no_sync,
            output,
        } => {
            commands::problems::handle_problems(&user_id, no_sync, output, &config, &database_url)
                .await?;
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server_bind());
            commands::serve::handle_serve(&bind, &config, &database_url).await?;
        }
        Commands::Completions { .. } | Commands::Man { .. } => {}
    }

    Ok(())
}
