//! Photo and caption collection

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::types::{Message, PhotoSize};
use unic_langid::LanguageIdentifier;

use super::types::{HandlerDeps, HandlerError, Reply, Sender};
use crate::carousel::session_store::update_session;
use crate::carousel::{CaptionOutcome, CollectRejection, PhotoRef, PhotoSubmission, PhotoVariant, MAX_SLIDES};
use crate::core::metrics;
use crate::i18n;
use crate::telegram::keyboards::after_save_keyboard;

/// Builds the submission for a photo message.
pub fn photo_submission(msg: &Message) -> PhotoSubmission {
    let photo = msg.photo().and_then(best_photo);
    PhotoSubmission {
        photo,
        in_album: msg.media_group_id().is_some(),
    }
}

fn best_photo(sizes: &[PhotoSize]) -> Option<PhotoRef> {
    let variants: Vec<PhotoVariant> = sizes
        .iter()
        .map(|size| PhotoVariant {
            photo: PhotoRef::new(size.file.id.0.clone()),
            width: size.width,
            height: size.height,
        })
        .collect();
    PhotoRef::best_of(&variants)
}

/// Localized reply for a rejected input.
pub fn rejection_text(lang: &LanguageIdentifier, rejection: &CollectRejection) -> String {
    let mut args = FluentArgs::new();
    args.set("max", MAX_SLIDES);

    let key = match rejection {
        CollectRejection::NotCollecting => "photo-not-collecting",
        CollectRejection::AlbumNotAccepted => "photo-album",
        CollectRejection::CaptionPending => "photo-caption-pending",
        CollectRejection::MaxSlidesReached => "photo-max-reached",
        CollectRejection::PhotoMissing => "send-photo-first",
        CollectRejection::NoSlides => "publish-no-slides",
    };
    i18n::t_args(lang, key, &args)
}

/// Accepts a photo as the pending one, or explains why it was rejected.
pub async fn handle_photo(
    deps: &HandlerDeps,
    sender: &Sender,
    submission: PhotoSubmission,
) -> Result<Reply, HandlerError> {
    let result = update_session(deps.sessions.as_ref(), sender.user, |session| session.accept_photo(submission)).await?;

    let reply = match result {
        Ok(number) => {
            log::info!("User {} sent photo for slide {}", sender.user, number);
            let mut args = FluentArgs::new();
            args.set("number", number);
            Reply::text(i18n::t_args(&sender.lang, "caption-prompt", &args))
        }
        Err(rejection) => {
            log::info!("Photo from user {} rejected: {}", sender.user, rejection);
            metrics::record_rejection(rejection.reason());
            Reply::text(rejection_text(&sender.lang, &rejection))
        }
    };

    Ok(reply)
}

/// Stores free-form text as the caption of the pending photo.
///
/// Returns `None` when the text is not meant for the collection flow.
pub async fn handle_text(deps: &HandlerDeps, sender: &Sender, text: &str) -> Result<Option<Reply>, HandlerError> {
    let result = update_session(deps.sessions.as_ref(), sender.user, |session| session.accept_text(text)).await?;
    let lang = &sender.lang;

    let reply = match result {
        Ok(CaptionOutcome::Ignored) => None,
        Ok(CaptionOutcome::Saved { count, at_capacity }) => {
            metrics::SLIDES_COLLECTED_TOTAL.inc();
            log::info!("User {} saved slide {}/{}", sender.user, count, MAX_SLIDES);

            let mut args = FluentArgs::new();
            args.set("count", count);
            args.set("max", MAX_SLIDES);
            let key = if at_capacity { "slide-saved-max" } else { "slide-saved" };
            Some(Reply::with_keyboard(
                i18n::t_args(lang, key, &args),
                after_save_keyboard(count, lang),
            ))
        }
        Err(rejection) => {
            metrics::record_rejection(rejection.reason());
            Some(Reply::text(rejection_text(lang, &rejection)))
        }
    };

    Ok(reply)
}
