//! Configuration read from the environment

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Target channel for published carousels
/// Read from CHANNEL_ID environment variable
/// Either a numeric id (e.g. -1001234567890) or a public @username
pub static CHANNEL_ID: Lazy<Option<String>> = Lazy::new(|| {
    env::var("CHANNEL_ID")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
});

/// Public base URL for Telegram updates
/// Read from WEBHOOK_URL environment variable
/// When set, the bot runs in webhook mode
pub static WEBHOOK_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("WEBHOOK_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
});

/// Port for the webhook listener
/// Read from PORT environment variable
/// Default: 3000
pub static PORT: Lazy<u16> = Lazy::new(|| env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000));

/// Custom Bot API server
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Language for channel posts and users without a supported Telegram locale
/// Read from DEFAULT_LANG environment variable
/// Default: uz
pub static DEFAULT_LANG: Lazy<String> = Lazy::new(|| env::var("DEFAULT_LANG").unwrap_or_else(|_| "uz".to_string()));

/// Carousel registry configuration
pub mod carousel {
    /// Length of generated carousel keys (base-36 characters)
    pub const KEY_LEN: usize = 8;

    /// Longest key accepted back from a button payload
    pub const KEY_MAX_LEN: usize = 32;

    /// How many fresh keys to try before giving up on a publish
    pub const KEY_ATTEMPTS: usize = 4;
}

/// Webhook configuration
pub mod webhook {
    /// Path the Telegram webhook is served on, appended to WEBHOOK_URL
    pub const PATH: &str = "/tg/webhook";
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum number of retries for dispatcher reconnection
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher retry attempts (in seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Dispatcher retry delay duration
    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }

    /// Base for exponential backoff after a dispatcher panic (seconds)
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;

    /// Attempts to reach the Bot API on startup before giving up
    pub const STARTUP_MAX_RETRIES: u32 = 12;

    /// Delay between startup attempts (in seconds)
    pub const STARTUP_RETRY_DELAY_SECS: u64 = 5;

    pub fn startup_delay() -> Duration {
        Duration::from_secs(STARTUP_RETRY_DELAY_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Metrics and monitoring configuration
pub mod metrics {
    use once_cell::sync::Lazy;
    use std::env;

    /// Enable metrics collection and HTTP server
    /// Read from METRICS_ENABLED environment variable
    /// Default: false
    pub static ENABLED: Lazy<bool> = Lazy::new(|| {
        env::var("METRICS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false)
    });

    /// Port for metrics HTTP server
    /// Read from METRICS_PORT environment variable
    /// Default: 9090
    pub static PORT: Lazy<u16> = Lazy::new(|| {
        env::var("METRICS_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(9090)
    });
}
