//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod fetch;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, Settings};
use crate::models::LanguageCode;
use crate::tracker::TrackingMode;

#[derive(Parser)]
#[command(name = "localcast")]
#[command(about = "Local weather and nearby recommendations for a point on the map")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long, global = true, env = "LOCALCAST_BACKEND_URL")]
    backend: Option<String>,

    /// Display language: KO, EN, JA, ZH or RU
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Tracking mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Single position request
    OneShot,
    /// Keep watching the position
    Continuous,
}

impl From<ModeArg> for TrackingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::OneShot => TrackingMode::OneShot,
            ModeArg::Continuous => TrackingMode::Continuous,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and display recommendations for a single point
    Fetch {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Print the HTML panel instead of terminal text
        #[arg(long)]
        html: bool,
    },

    /// Run an interactive session driven by stdin commands and replayed fixes
    Session {
        /// Track file with one `lat,lon` per line, used as the position source
        #[arg(long)]
        replay: Option<PathBuf>,
        /// Delay between replayed fixes in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
        /// Tracking mode (overrides config file)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Accept the location prompt without asking
        #[arg(long, conflicts_with = "no_location")]
        use_location: bool,
        /// Decline the location prompt without asking
        #[arg(long)]
        no_location: bool,
        /// Keep tracking after manual map clicks
        #[arg(long)]
        keep_tracking: bool,
        /// Write the HTML panel to this file after every update
        #[arg(long)]
        html_out: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,
}

/// Apply global CLI overrides on top of loaded settings.
fn apply_overrides(mut settings: Settings, backend: Option<String>, lang: Option<&str>) -> Settings {
    if let Some(url) = backend {
        settings.backend.base_url = url;
    }
    if let Some(code) = lang {
        settings.default_language = LanguageCode::from_code_or_default(Some(code));
    }
    settings
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    let settings = apply_overrides(settings, cli.backend, cli.lang.as_deref());

    match cli.command {
        Commands::Fetch { lat, lon, html } => fetch::cmd_fetch(&settings, lat, lon, html).await,
        Commands::Session {
            replay,
            interval_ms,
            mode,
            use_location,
            no_location,
            keep_tracking,
            html_out,
        } => {
            let mut settings = settings;
            if let Some(mode) = mode {
                settings.tracking.mode = mode.into();
            }
            if keep_tracking {
                settings.tracking.cancel_on_click = false;
            }
            let permission = if use_location {
                Some(true)
            } else if no_location {
                Some(false)
            } else {
                None
            };
            session::cmd_session(
                &settings,
                session::SessionArgs {
                    replay,
                    interval: std::time::Duration::from_millis(interval_ms),
                    permission,
                    html_out,
                },
            )
            .await
        }
        Commands::Config => config_cmd::cmd_config_show(&settings, cli.config.as_deref()),
    }
}
