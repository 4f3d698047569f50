//! Inline button handling
//!
//! Buttons of the after-save menu act on the presser's own session.
//! Navigation buttons on a channel post can be pressed by any viewer.

use fluent_templates::fluent_bundle::FluentArgs;

use super::collect::rejection_text;
use super::types::{CallbackResponse, HandlerDeps, HandlerError, Reply, Sender};
use crate::carousel::session_store::update_session;
use crate::carousel::{self, CallbackAction, CollectRejection, NavigationOutcome, PostHandle, PublishError, MAX_SLIDES};
use crate::i18n;

/// Decides how to answer a pressed button.
///
/// # Arguments
/// * `post` - the message the button is attached to, if the client reported it
pub async fn handle_callback(
    deps: &HandlerDeps,
    sender: &Sender,
    action: CallbackAction,
    post: Option<PostHandle>,
) -> Result<CallbackResponse, HandlerError> {
    let lang = &sender.lang;

    let response = match action {
        CallbackAction::Noop => CallbackResponse::notice(i18n::t(lang, "nav-noop")),
        CallbackAction::Unknown(data) => {
            log::debug!("Ignoring unknown callback payload {:?} from user {}", data, sender.user);
            CallbackResponse::silent()
        }
        CallbackAction::More => {
            let session = deps.sessions.load(sender.user).await?;
            let text = match session.request_more() {
                Ok(_) => i18n::t(lang, "more-next-photo"),
                Err(_) => {
                    let mut args = FluentArgs::new();
                    args.set("max", MAX_SLIDES);
                    i18n::t_args(lang, "more-max-reached", &args)
                }
            };
            CallbackResponse::reply(Reply::text(text))
        }
        CallbackAction::Reset => {
            update_session(deps.sessions.as_ref(), sender.user, |session| session.reset()).await?;
            log::info!("User {} restarted the carousel", sender.user);
            CallbackResponse {
                notice: Some(i18n::t(lang, "reset-ack")),
                reply: Some(Reply::text(i18n::t(lang, "reset-started"))),
            }
        }
        CallbackAction::Publish => CallbackResponse::reply(Reply::text(publish_session(deps, sender).await?)),
        CallbackAction::Navigate { key, index } => {
            let Some(post) = post else {
                log::warn!("Navigation on carousel {} without a message to edit", key);
                return Ok(CallbackResponse::notice(i18n::t(lang, "nav-edit-failed")));
            };

            match carousel::navigate(deps.carousels.as_ref(), deps.transport.as_ref(), post, &key, index).await {
                NavigationOutcome::Rendered { .. } => CallbackResponse::silent(),
                NavigationOutcome::NotFound => CallbackResponse::notice(i18n::t(lang, "nav-not-found")),
                NavigationOutcome::EditFailed(_) => CallbackResponse::notice(i18n::t(lang, "nav-edit-failed")),
            }
        }
    };

    Ok(response)
}

/// Publishes the sender's slides and returns the text for the private chat.
///
/// The session is left as is, so the same slides can be posted again.
async fn publish_session(deps: &HandlerDeps, sender: &Sender) -> Result<String, HandlerError> {
    let session = deps.sessions.load(sender.user).await?;
    let lang = &sender.lang;

    let text = match carousel::publish(&session, deps.carousels.as_ref(), deps.transport.as_ref()).await {
        Ok(published) => {
            log::info!(
                "User {} published carousel {} ({} slides)",
                sender.user,
                published.key,
                published.total
            );
            i18n::t(lang, "publish-ok")
        }
        Err(PublishError::Rejected(CollectRejection::NoSlides)) => i18n::t(lang, "publish-no-slides"),
        Err(PublishError::Rejected(rejection)) => rejection_text(lang, &rejection),
        Err(PublishError::Registry(e)) => {
            log::error!("User {} could not publish: {}", sender.user, e);
            i18n::t(lang, "publish-unavailable")
        }
        Err(PublishError::Transport { key, source }) => {
            log::error!("User {} could not publish carousel {}: {}", sender.user, key, source);
            i18n::t(lang, "publish-failed")
        }
    };

    Ok(text)
}
