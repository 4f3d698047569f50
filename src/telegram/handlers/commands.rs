//! Command handler implementations (/start, /new, /cancel, /done)

use fluent_templates::fluent_bundle::FluentArgs;

use super::types::{HandlerDeps, HandlerError, Reply, Sender};
use crate::carousel::session_store::update_session;
use crate::core::metrics;
use crate::i18n;
use crate::telegram::bot::Command;
use crate::telegram::keyboards::after_save_keyboard;

/// Applies a command to the sender's session and builds the reply.
pub async fn handle_command(deps: &HandlerDeps, sender: &Sender, cmd: Command) -> Result<Reply, HandlerError> {
    metrics::record_command(cmd.name());
    let lang = &sender.lang;

    let reply = match cmd {
        Command::Start => Reply::text(i18n::t(lang, "start-welcome")),
        Command::New => {
            update_session(deps.sessions.as_ref(), sender.user, |session| session.start()).await?;
            log::info!("User {} started a new carousel", sender.user);
            Reply::text(i18n::t(lang, "new-started"))
        }
        Command::Cancel => {
            update_session(deps.sessions.as_ref(), sender.user, |session| session.cancel()).await?;
            log::info!("User {} cancelled the carousel", sender.user);
            Reply::text(i18n::t(lang, "cancelled"))
        }
        Command::Done => {
            let session = deps.sessions.load(sender.user).await?;
            let count = session.slide_count();
            if count == 0 {
                Reply::text(i18n::t(lang, "done-empty"))
            } else {
                let mut args = FluentArgs::new();
                args.set("count", count);
                Reply::with_keyboard(i18n::t_args(lang, "done-ready", &args), after_save_keyboard(count, lang))
            }
        }
    };

    Ok(reply)
}
