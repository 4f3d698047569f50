//! Bot initialization and startup checks
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command registration in the Telegram UI
//! - The channel admin probe

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, Recipient};
use teloxide::utils::command::BotCommands;

use super::transport::channel_label;
use crate::core::config;
use crate::i18n;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Buyruqlar:")]
pub enum Command {
    #[command(description = "botni ishga tushirish")]
    Start,
    #[command(description = "yangi carousel boshlash")]
    New,
    #[command(description = "jarayonni bekor qilish")]
    Cancel,
    #[command(description = "tayyor slaydlarni ko‘rish")]
    Done,
}

impl Command {
    /// Metric label and log name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::New => "new",
            Self::Cancel => "cancel",
            Self::Done => "done",
        }
    }
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token, invalid BOT_API_URL or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    if config::BOT_TOKEN.is_empty() {
        anyhow::bail!("BOT_TOKEN is not set");
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(config::BOT_TOKEN.as_str(), client);

    // Check if local Bot API server is configured
    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

fn localized_commands(lang: &unic_langid::LanguageIdentifier) -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", i18n::t(lang, "cmd-start")),
        BotCommand::new("new", i18n::t(lang, "cmd-new")),
        BotCommand::new("cancel", i18n::t(lang, "cmd-cancel")),
        BotCommand::new("done", i18n::t(lang, "cmd-done")),
    ]
}

/// Sets up bot commands in Telegram UI
///
/// Registers the default list plus one list per supported language.
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(localized_commands(&i18n::default_lang())).await?;

    for (code, _) in i18n::SUPPORTED_LANGS {
        let lang = i18n::lang_from_code(code);
        bot.set_my_commands(localized_commands(&lang))
            .language_code(code.to_string())
            .await?;
    }

    Ok(())
}

/// Checks whether the bot is an administrator of the target channel.
///
/// Posting to a channel requires admin rights, so a `false` here means every
/// publish will be rejected.
pub async fn check_channel_access(bot: &Bot, channel: &Recipient) -> Result<bool, teloxide::RequestError> {
    let me = bot.get_me().await?;
    let member = bot.get_chat_member(channel.clone(), me.id).await?;
    let privileged = member.kind.is_privileged();

    if privileged {
        log::info!("Bot @{} is an administrator of {}", me.username(), channel_label(channel));
    } else {
        log::warn!(
            "Bot @{} is not an administrator of {}, publishing will fail",
            me.username(),
            channel_label(channel)
        );
    }

    Ok(privileged)
}
