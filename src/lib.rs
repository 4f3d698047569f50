//! Carousel bot - collects photo+caption slides in a private chat and
//! publishes them to a channel as one post paged by inline buttons.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and metrics
//! - `carousel`: the collection state machine, the carousel registry and the paging protocol
//! - `telegram`: Telegram transport, keyboards and the dispatcher handler tree
//! - `i18n`: localized user-facing texts

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod carousel;
pub mod cli;
pub mod core;
pub mod i18n;
pub mod telegram;

// Re-export commonly used types for convenience
pub use carousel::{CallbackAction, CarouselKey, CollectionSession, Slide, MAX_SLIDES};
pub use core::{config, AppError, AppResult};
pub use telegram::{schema, HandlerDeps};
