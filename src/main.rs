use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod commands;

use cli::{Cli, Commands};
use insayt_track::config::{Config, LogLevel};
use insayt_track::EventEmitter;

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("insayt")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("insayt-track.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.as_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

/// Fold command-line overrides into the loaded configuration
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if let Some(site_id) = &cli.site_id {
        config.site_id = site_id.clone();
    }
    if let Some(visitor_id) = &cli.visitor_id {
        config.visitor_id = visitor_id.clone();
    }
    config
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let emitter = EventEmitter::new(&config);
    info!("Collect endpoint: {}", emitter.collect_url());

    match cli.command {
        Commands::Pageview {
            page_url,
            referrer,
            title,
        } => commands::track::pageview(&page_url, referrer, title, &config, &emitter),
        Commands::Event { name, properties } => commands::track::event(&name, &properties, &config, &emitter),
        Commands::Identify { user_id, traits } => commands::track::identify(&user_id, &traits, &config, &emitter),
        Commands::Demo => commands::demo::run(&config, &emitter),
        Commands::Config => commands::config::run(&config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = apply_overrides(&cli, config);

    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting insayt-track with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
