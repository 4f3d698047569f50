use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use teloxide::update_listeners::webhooks;
use tokio::net::TcpListener;
use tokio::time::sleep;

use carousel_bot::carousel::{InMemoryCarouselStore, InMemorySessionStore};
use carousel_bot::cli::{Cli, Commands};
use carousel_bot::core::error::{AppError, AppResult};
use carousel_bot::core::{config, init_logger, log_configuration, metrics, metrics_server};
use carousel_bot::i18n;
use carousel_bot::telegram::{
    check_channel_access, create_bot, parse_channel, schema, setup_bot_commands, HandlerDeps, HandlerError,
    TelegramTransport,
};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot creation, listener bind).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up global panic handler to catch panics in dispatcher
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let result = match cli.command {
        Some(Commands::Run { webhook }) => {
            log::info!("Running bot in normal mode (webhook: {})", webhook);
            run_bot(webhook).await
        }
        Some(Commands::CheckChannel) => run_check_channel().await,
        None => {
            // No command specified - default to running the bot
            log::info!("No command specified, running bot in default mode");
            run_bot(false).await
        }
    };

    if let Err(e) = &result {
        log::error!("Fatal: {:#}", e);
    }
    result
}

/// Reads CHANNEL_ID into a recipient for channel posts
fn channel_from_config() -> AppResult<Recipient> {
    let raw = config::CHANNEL_ID
        .as_deref()
        .ok_or_else(|| AppError::Config("CHANNEL_ID is not set".to_string()))?;
    parse_channel(raw).ok_or_else(|| AppError::Config(format!("CHANNEL_ID is not a chat id or @username: {}", raw)))
}

/// Run the check-channel command
async fn run_check_channel() -> Result<()> {
    let channel = channel_from_config()?;
    let bot = create_bot()?;

    if check_channel_access(&bot, &channel).await? {
        println!("✅ The bot can post to the channel");
        Ok(())
    } else {
        Err(anyhow::anyhow!("The bot is not an administrator of the channel"))
    }
}

/// Waits until the Bot API answers getMe
///
/// Retries network failures (a local Bot API server may still be starting);
/// an API rejection such as an invalid token fails immediately.
async fn wait_for_bot_api(bot: &Bot) -> Result<teloxide::types::Me> {
    let max_retries = config::retry::STARTUP_MAX_RETRIES;
    let mut attempt = 0;

    loop {
        match bot.get_me().await {
            Ok(me) => return Ok(me),
            Err(e) => {
                attempt += 1;
                let is_retryable = !matches!(e, teloxide::RequestError::Api(_));
                if attempt >= max_retries || !is_retryable {
                    return Err(anyhow::anyhow!(
                        "Failed to connect to Bot API after {} attempt(s): {}",
                        attempt,
                        e
                    ));
                }

                log::warn!(
                    "Bot API not ready (attempt {}/{}): {}. Retrying in {}s...",
                    attempt,
                    max_retries,
                    e,
                    config::retry::STARTUP_RETRY_DELAY_SECS
                );
                sleep(config::retry::startup_delay()).await;
            }
        }
    }
}

async fn run_bot(use_webhook: bool) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");
    log_configuration();

    // Initialize metrics registry
    metrics::init_metrics();

    let channel = channel_from_config()?;
    let bot = create_bot()?;

    let me = wait_for_bot_api(&bot).await?;
    log::info!("Bot username: @{}, Bot ID: {}", me.username(), me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    // Not fatal: the channel may grant admin rights later
    if let Err(e) = check_channel_access(&bot, &channel).await {
        log::warn!("Could not verify channel access: {}", e);
    }

    // Start metrics HTTP server if enabled
    if *config::metrics::ENABLED {
        let metrics_port = *config::metrics::PORT;
        tokio::spawn(async move {
            if let Err(e) = metrics_server::start_metrics_server(metrics_port).await {
                log::error!("Metrics server error: {}", e);
            }
        });
    }

    let transport = TelegramTransport::new(bot.clone(), channel, i18n::default_lang());
    let handler_deps = HandlerDeps::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryCarouselStore::new()),
        Arc::new(transport),
    );

    // Create the dispatcher handler tree using the modular schema
    let handler = schema(handler_deps);

    let use_webhook = use_webhook || config::WEBHOOK_URL.is_some();
    let init_elapsed = bot_init_start.elapsed();
    log::info!("Bot initialization complete in {:.2}s", init_elapsed.as_secs_f64());

    if use_webhook {
        run_webhook(bot, handler).await?;
    } else {
        run_polling(bot, handler).await;
    }

    Ok(())
}

/// Serves Telegram updates, `/` and `/health` on PORT
async fn run_webhook(bot: Bot, handler: teloxide::dispatching::UpdateHandler<HandlerError>) -> AppResult<()> {
    let base = config::WEBHOOK_URL
        .as_deref()
        .ok_or_else(|| AppError::Config("webhook mode requires WEBHOOK_URL".to_string()))?;
    let url = url::Url::parse(&format!("{}{}", base, config::webhook::PATH))?;
    let addr = SocketAddr::from(([0, 0, 0, 0], *config::PORT));

    log::info!("Starting bot in webhook mode at {} (listening on {})", url, addr);

    let options = webhooks::Options::new(addr, url).drop_pending_updates();
    let (listener, stop_flag, router) = webhooks::axum_to_router(bot.clone(), options).await?;
    let app = router.merge(metrics_server::health_router());

    let tcp = TcpListener::bind(addr).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp, app).with_graceful_shutdown(stop_flag).await {
            log::error!("Webhook server error: {}", e);
        }
    });

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Long polling with reconnection after dispatcher panics
async fn run_polling(bot: Bot, handler: teloxide::dispatching::UpdateHandler<HandlerError>) {
    log::info!("Starting bot in long polling mode");

    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;
    let mut retry_count = 0;

    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // Run the dispatcher in a separate task to isolate panics
        let handle = tokio::spawn(async move {
            use teloxide::update_listeners::Polling;

            // Create polling listener that drops pending updates on start
            let listener = Polling::builder(bot_clone.clone()).drop_pending_updates().build();

            Dispatcher::builder(bot_clone, handler_clone)
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);

                if retry_count < max_retries {
                    retry_count += 1;
                    log::info!(
                        "Retrying dispatcher connection after panic (attempt {}/{})...",
                        retry_count,
                        max_retries
                    );
                    exponential_backoff(retry_count).await;
                } else {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }

        // Add a delay between retries to avoid overwhelming the API
        sleep(config::retry::dispatcher_delay()).await;
    }
}

async fn exponential_backoff(retry_count: u32) {
    let delay = std::time::Duration::from_secs(config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count));
    sleep(delay).await;
}
