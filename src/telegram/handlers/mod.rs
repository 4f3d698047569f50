//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! The handler bodies are plain async functions over `HandlerDeps`, so
//! integration tests can drive them without a Bot API connection.

mod callbacks;
mod collect;
mod commands;
mod schema;
mod types;

pub use callbacks::handle_callback;
pub use collect::{handle_photo, handle_text, photo_submission, rejection_text};
pub use commands::handle_command;
pub use schema::schema;
pub use types::{CallbackResponse, HandlerDeps, HandlerError, Reply, Sender};
