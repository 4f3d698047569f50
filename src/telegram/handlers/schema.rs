//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::callbacks::handle_callback;
use super::collect::{handle_photo, handle_text, photo_submission};
use super::commands::handle_command;
use super::types::{HandlerDeps, HandlerError, Sender};
use crate::carousel::{CallbackAction, PostHandle};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The collection flow only runs in private chats; callback queries are
/// accepted from anywhere since channel viewers press the navigation buttons.
///
/// # Arguments
/// * `deps` - Handler dependencies (session store, carousel registry, channel transport)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_photos = deps.clone();
    let deps_texts = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(photo_handler(deps_photos))
        .branch(text_handler(deps_texts))
        .branch(callback_handler(deps_callback))
}

fn private_sender(msg: &Message) -> Option<Sender> {
    if !msg.chat.is_private() {
        return None;
    }
    msg.from.as_ref().map(Sender::from_user)
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                let Some(sender) = private_sender(&msg) else {
                    return Ok(());
                };
                log::info!("Received command {:?} from user {}", cmd, sender.user);

                let reply = handle_command(&deps, &sender, cmd).await?;
                reply.send(&bot, msg.chat.id).await?;
                Ok(())
            }
        })
}

fn photo_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private() && msg.photo().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let Some(sender) = private_sender(&msg) else {
                    return Ok(());
                };

                let reply = handle_photo(&deps, &sender, photo_submission(&msg)).await?;
                reply.send(&bot, msg.chat.id).await?;
                Ok(())
            }
        })
}

fn text_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private() && msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let (Some(sender), Some(text)) = (private_sender(&msg), msg.text()) else {
                    return Ok(());
                };

                if let Some(reply) = handle_text(&deps, &sender, text).await? {
                    reply.send(&bot, msg.chat.id).await?;
                }
                Ok(())
            }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            let sender = Sender::from_user(&q.from);
            let action = CallbackAction::parse(q.data.as_deref().unwrap_or_default());
            let post = q.message.as_ref().map(|m| PostHandle {
                chat_id: m.chat().id.0,
                message_id: m.id().0,
            });

            // Always answer so the client stops its progress indicator
            let response = match handle_callback(&deps, &sender, action, post).await {
                Ok(response) => response,
                Err(e) => {
                    bot.answer_callback_query(q.id.clone()).await?;
                    return Err(e);
                }
            };

            let mut answer = bot.answer_callback_query(q.id.clone());
            if let Some(notice) = response.notice {
                answer = answer.text(notice);
            }
            answer.await?;

            if let Some(reply) = response.reply {
                reply.send(&bot, ChatId::from(q.from.id)).await?;
            }
            Ok(())
        }
    })
}
