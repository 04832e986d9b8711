// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/emergencia

//! Emergencia - Interactive Emergency Report Console
//!
//! Runs one interactive session on the terminal: profile registration,
//! guided emergency interviews, alert dispatch, audit logging and feedback.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use emergencia::config::AlertKind;
use emergencia::{build_channel, AuditLog, Config, Console, Session, VERSION};

/// Emergencia - Interactive Emergency Report Console
#[derive(Parser, Debug)]
#[command(name = "emergencia")]
#[command(author = "Emergencia Project")]
#[command(version = VERSION)]
#[command(about = "Guided emergency reporting with alert dispatch and audit trail")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the alert, history and feedback logs
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Alert delivery medium
    #[arg(long, value_enum)]
    channel: Option<AlertKind>,

    /// Health-center directory JSON file
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!();
        eprintln!("=== ERROR CRÍTICO ===");
        eprintln!("Se ha producido un error inesperado: {:#}", e);
    }
}

/// CLI flags first, then `RUST_LOG`, then the configured level
fn log_filter(trace: bool, debug: bool, configured: &str) -> EnvFilter {
    if trace {
        EnvFilter::new("trace")
    } else if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    }
}

fn run(args: Args) -> Result<()> {
    // Load or create configuration
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let created = !config_path.exists();
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(channel) = args.channel {
        config.alert.channel = channel;
    }
    if let Some(directory) = args.directory {
        config.directory.path = directory;
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(args.trace, args.debug, &config.log_level))
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Emergencia v{}", VERSION);
    if created {
        info!("Saved default configuration to {:?}", config_path);
    } else {
        info!("Loaded configuration from {:?}", config_path);
    }

    std::fs::create_dir_all(&config.data_dir)?;
    debug!(
        alerts = ?config.data_path(&config.alert.trail_file),
        history = ?config.data_path(&config.audit.history_file),
        feedback = ?config.data_path(&config.audit.feedback_file),
        "log files"
    );

    let alert = build_channel(&config.alert, &config.data_dir);
    info!("Alert channel: {}", alert.alert_type());
    let audit = AuditLog::from_config(&config.audit, &config.data_dir);

    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(console, alert, audit, config.directory.clone())
        .with_emergency_number(config.alert.emergency_number.clone());

    let stats = session.run()?;
    info!(?stats, "session closed");

    Ok(())
}
