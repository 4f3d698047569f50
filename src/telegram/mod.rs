//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod keyboards;
pub mod transport;

// Re-exports for convenience
pub use bot::{check_channel_access, create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use transport::{parse_channel, TelegramTransport};
