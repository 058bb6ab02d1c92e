mod api;
mod config;
mod countdown;
mod events;
mod live;
mod render;
mod schedule;
mod state;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use api::JolpicaClient;
use config::Config;
use countdown::SystemClock;
use render::Style;

/// f1dash: Formula 1 standings and race countdowns in the terminal
#[derive(Parser)]
#[command(name = "f1dash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Leader, top drivers and the next races (default)
    Home {
        /// Keep a live countdown to the next race until Ctrl+C
        #[arg(short, long)]
        watch: bool,
    },

    /// Full drivers' championship
    Drivers,

    /// Constructors' championship with insights
    Constructors,

    /// Whole-season race calendar
    Schedule,
}

/// Initialize logging to stderr. RUST_LOG wins over the configured level.
fn init_logging(default_level: &str) {
    let default = default_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_logging(&cfg.general.log_level);
    debug!(?cfg, "loaded config");

    let client = JolpicaClient::new(&cfg.api).context("creating API client")?;
    let style = Style {
        color: cfg
            .display
            .color
            .unwrap_or_else(|| std::io::stdout().is_terminal()),
    };
    let now = Utc::now();

    match cli.command.unwrap_or(Commands::Home { watch: false }) {
        Commands::Home { watch } => {
            let (drivers, outlook) = tokio::join!(
                client.driver_standings(),
                schedule::load_outlook(&client, now, cfg.display.upcoming_races),
            );
            let drivers = drivers
                .inspect_err(|e| warn!(error = %e, "unable to load driver standings"))
                .ok();
            let outlook = outlook
                .inspect_err(|e| warn!(error = %e, "unable to load race schedule"))
                .ok();

            println!(
                "{}",
                render::home(
                    drivers.as_deref(),
                    outlook.as_ref(),
                    cfg.display.top_drivers,
                    now,
                    style,
                )
            );

            if watch {
                if let Some(outlook) = outlook {
                    println!();
                    live::watch(&client, outlook, Arc::new(SystemClock)).await?;
                }
            }
        }
        Commands::Drivers => {
            let standings = client.driver_standings().await.unwrap_or_else(|e| {
                warn!(error = %e, "unable to load driver standings");
                Vec::new()
            });
            println!("{}", render::drivers(&standings, now.year(), style));
        }
        Commands::Constructors => {
            let standings = client.constructor_standings().await.unwrap_or_else(|e| {
                warn!(error = %e, "unable to load constructor standings");
                Vec::new()
            });
            println!("{}", render::constructors(&standings, now.year(), style));
        }
        Commands::Schedule => {
            let races = client
                .schedule(api::Season::Current)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "unable to load race schedule");
                    Vec::new()
                });
            println!("{}", render::calendar(&races, now));
        }
    }

    Ok(())
}
