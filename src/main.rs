//! AthleteLog CLI
//!
//! Command-line interface for the training log:
//! - Add and view workouts
//! - Estimate one-rep maxima
//! - Generate a progress report
//! - Export CSV
//! - Serve the dashboard

use anyhow::Context;
use athletelog::api::{self, AppState};
use athletelog::config::{generate_default_config, Config, LoggingConfig};
use athletelog::storage::{write_csv, WorkoutLog, WorkoutRecord};
use athletelog::{report, stats};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "athletelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track your workouts like a pro")]
#[command(long_about = "Personal training log.\nRecord sets, estimate one-rep maxima, write progress reports and browse everything on a local dashboard.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: the user config dir, then ./athletelog.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workout log file (overrides config)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new workout entry
    Add {
        /// Date in YYYY-MM-DD format
        date: String,
        /// Exercise name, e.g. Squat
        exercise: String,
        /// Weight in lbs
        weight: f64,
        /// Repetitions
        reps: u32,
    },

    /// View all workout entries
    View,

    /// Calculate estimated 1RM for every entry (Epley)
    Stats {
        /// Save the estimates back into the log
        #[arg(long)]
        write: bool,
    },

    /// Generate summary.txt and report.html next to the log
    Report,

    /// Export the log as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the dashboard and open it in the browser
    Dashboard {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let resolved = Config::resolve(cli.config.as_deref())?;
    let mut config = resolved.config;
    if let Some(data_file) = cli.data_file {
        config.data.file = data_file;
    }

    init_tracing(&config.logging);

    for error in &resolved.skipped {
        tracing::warn!("Skipping config file: {}", error);
    }
    match &resolved.loaded_from {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::debug!("Using default config with environment overrides"),
    }

    let log = WorkoutLog::new(&config.data.file);

    match cli.command {
        Commands::Add {
            date,
            exercise,
            weight,
            reps,
        } => {
            let record = WorkoutRecord::new(date, exercise, weight, reps)?;
            log.append(record.clone())
                .await
                .with_context(|| format!("Failed to save workout to {:?}", log.path()))?;

            println!(
                "Added: {} - {} @ {:.1} lb x {} reps",
                record.date, record.exercise, record.weight, record.reps
            );
        }

        Commands::View => {
            if !log.exists().await {
                println!("No workouts logged yet. Add some first!");
                return Ok(());
            }

            let records = log.load().await?;
            if records.is_empty() {
                println!("No workouts recorded yet.");
                return Ok(());
            }

            println!("Your Training Log:");
            for (i, w) in records.iter().enumerate() {
                println!(
                    "{:3} | {} | {:<12} | {:.1} lb x {} reps",
                    i + 1,
                    w.date,
                    w.exercise,
                    w.weight,
                    w.reps
                );
            }
        }

        Commands::Stats { write } => {
            let mut records = log.load().await?;
            if records.is_empty() {
                println!("No workouts yet. Add some first!");
                return Ok(());
            }

            stats::annotate(&mut records);

            println!("Stats Calculation");
            for w in &records {
                println!(
                    "{}  |  {}  | {} lb x {} reps -> est. 1RM: {} lb",
                    w.date,
                    w.exercise,
                    w.weight,
                    w.reps,
                    w.estimated_1rm
                        .map(|e| format!("{:.0}", e))
                        .unwrap_or_else(|| "-".to_string())
                );
            }

            if write {
                log.replace_all(&records).await?;
                println!();
                println!("Saved estimates to {:?}", log.path());
            }
        }

        Commands::Report => {
            let template = config
                .dashboard
                .load_template()
                .await
                .context("Invalid dashboard template")?;
            match report::generate(log.path(), &template).await? {
                Some(paths) => {
                    println!("Report generated: {}", paths.html.display());
                    println!("Summary generated: {}", paths.summary.display());
                }
                None => println!("No workouts yet."),
            }
        }

        Commands::Export { output } => {
            let records = log.load().await?;

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create {:?}", path))?;
                    write_csv(&records, file)?;
                    println!("Exported {} workouts to {:?}", records.len(), path);
                }
                None => write_csv(&records, std::io::stdout().lock())?,
            }
        }

        Commands::Dashboard {
            host,
            port,
            no_open,
        } => {
            if let Some(host) = host {
                config.dashboard.host = host;
            }
            if let Some(port) = port {
                config.dashboard.port = port;
            }
            if no_open {
                config.dashboard.open_browser = false;
            }

            if config.dashboard.data_url.is_none() && !log.exists().await {
                tracing::warn!(
                    path = ?log.path(),
                    "No workout log yet; the dashboard shows an error until workouts are added"
                );
            }

            let state = AppState::from_config(&config)
                .await
                .context("Invalid dashboard configuration")?;

            println!("Press Ctrl+C to stop the server when done.");
            api::serve(state, &config.dashboard).await?;
        }

        Commands::Config { output } => {
            let contents = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &contents)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", contents);
                }
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the config level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "athletelog={level},tower_http={level}",
            level = logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
