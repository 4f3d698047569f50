//! Handler types, dependencies, and sender helpers

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, User};
use unic_langid::LanguageIdentifier;

use crate::carousel::{CarouselStore, CarouselTransport, SessionStore, UserKey};
use crate::i18n;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: Arc<dyn SessionStore>,
    pub carousels: Arc<dyn CarouselStore>,
    pub transport: Arc<dyn CarouselTransport>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        carousels: Arc<dyn CarouselStore>,
        transport: Arc<dyn CarouselTransport>,
    ) -> Self {
        Self {
            sessions,
            carousels,
            transport,
        }
    }
}

/// Who sent an update and which language to answer in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub user: UserKey,
    pub lang: LanguageIdentifier,
}

impl Sender {
    pub fn new(user: UserKey, lang: LanguageIdentifier) -> Self {
        Self { user, lang }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            user: UserKey(user.id.0),
            lang: i18n::user_lang(user.language_code.as_deref()),
        }
    }
}

/// Text reply to the user's private chat, optionally with an inline keyboard
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub async fn send(self, bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
        let request = bot.send_message(chat_id, self.text);
        match self.keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }
}

/// What to do with a pressed button
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallbackResponse {
    /// Short notice shown by the client when the query is answered
    pub notice: Option<String>,
    /// Follow-up message in the presser's private chat
    pub reply: Option<Reply>,
}

impl CallbackResponse {
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            notice: Some(text.into()),
            reply: None,
        }
    }

    pub fn reply(reply: Reply) -> Self {
        Self {
            notice: None,
            reply: Some(reply),
        }
    }
}
