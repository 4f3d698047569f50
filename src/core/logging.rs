//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A summary of the effective configuration at startup

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration, without secrets.
pub fn log_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_empty() {
        log::error!("BOT_TOKEN: not set");
    } else {
        log::info!("BOT_TOKEN: set ({} chars)", config::BOT_TOKEN.len());
    }

    match config::CHANNEL_ID.as_deref() {
        Some(channel) => log::info!("CHANNEL_ID: {}", channel),
        None => log::error!("CHANNEL_ID: not set, publishing is impossible"),
    }

    match config::WEBHOOK_URL.as_deref() {
        Some(url) => log::info!("WEBHOOK_URL: {} (port {})", url, *config::PORT),
        None => log::info!("WEBHOOK_URL: not set, long polling will be used"),
    }

    if let Some(api_url) = config::BOT_API_URL.as_deref() {
        log::info!("BOT_API_URL: {}", api_url);
    }

    log::info!("DEFAULT_LANG: {}", *config::DEFAULT_LANG);
    log::info!(
        "Metrics: {}",
        if *config::metrics::ENABLED {
            format!("enabled on port {}", *config::metrics::PORT)
        } else {
            "disabled".to_string()
        }
    );
}
