//! Telegram implementation of the carousel transport
//!
//! Pages are posted to the channel as photo messages with an HTML caption
//! and the navigation row; paging edits the media of the same message.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, FileId, InputFile, InputMedia, InputMediaPhoto, MessageId, ParseMode, Recipient,
};
use teloxide::{ApiError, RequestError};
use unic_langid::LanguageIdentifier;

use super::keyboards::nav_keyboard;
use crate::carousel::{CarouselTransport, PostHandle, RenderedPage, TransportError};

/// Parses CHANNEL_ID: a numeric chat id or a public `@username`.
pub fn parse_channel(raw: &str) -> Option<Recipient> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(id) = raw.parse::<i64>() {
        return Some(Recipient::Id(ChatId(id)));
    }
    let username = raw.strip_prefix('@').unwrap_or(raw);
    if username.is_empty() || !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(Recipient::ChannelUsername(format!("@{}", username)))
}

/// Human-readable form of the channel for logs.
pub fn channel_label(channel: &Recipient) -> String {
    match channel {
        Recipient::Id(id) => id.0.to_string(),
        Recipient::ChannelUsername(username) => username.clone(),
    }
}

/// Maps a Bot API failure onto the transport error the paging logic reports.
pub fn map_request_error(err: RequestError) -> TransportError {
    match err {
        RequestError::Api(api) => TransportError::Rejected(api.to_string()),
        RequestError::MigrateToChatId(chat) => {
            TransportError::Rejected(format!("channel migrated to {}", chat))
        }
        other => TransportError::Network(other.to_string()),
    }
}

/// Posts carousel pages into one channel.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
    channel: Recipient,
    lang: LanguageIdentifier,
}

impl TelegramTransport {
    /// # Arguments
    /// * `channel` - target channel for new posts
    /// * `lang` - language of the navigation buttons
    pub fn new(bot: Bot, channel: Recipient, lang: LanguageIdentifier) -> Self {
        Self { bot, channel, lang }
    }

    pub fn channel(&self) -> &Recipient {
        &self.channel
    }
}

#[async_trait]
impl CarouselTransport for TelegramTransport {
    async fn send_page(&self, page: &RenderedPage) -> Result<PostHandle, TransportError> {
        let photo = InputFile::file_id(FileId(page.photo.as_str().to_string()));

        let msg = self
            .bot
            .send_photo(self.channel.clone(), photo)
            .caption(page.caption_html())
            .parse_mode(ParseMode::Html)
            .reply_markup(nav_keyboard(&page.nav, &self.lang))
            .await
            .map_err(map_request_error)?;

        Ok(PostHandle {
            chat_id: msg.chat.id.0,
            message_id: msg.id.0,
        })
    }

    async fn edit_page(&self, post: PostHandle, page: &RenderedPage) -> Result<(), TransportError> {
        let photo = InputFile::file_id(FileId(page.photo.as_str().to_string()));
        let media = InputMedia::Photo(
            InputMediaPhoto::new(photo)
                .caption(page.caption_html())
                .parse_mode(ParseMode::Html),
        );

        let result = self
            .bot
            .edit_message_media(ChatId(post.chat_id), MessageId(post.message_id), media)
            .reply_markup(nav_keyboard(&page.nav, &self.lang))
            .await;

        match result {
            Ok(_) => Ok(()),
            // Re-rendering the page already on screen
            Err(RequestError::Api(ApiError::MessageNotModified)) => {
                log::debug!("Message {} already shows page {}", post.message_id, page.index + 1);
                Ok(())
            }
            Err(e) => Err(map_request_error(e)),
        }
    }
}
