use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use unic_langid::LanguageIdentifier;

use crate::carousel::{CallbackAction, NavButton, NavControl, MAX_SLIDES};
use crate::i18n;

/// Shorthand for a callback button carrying an encoded action.
pub fn cb(label: impl Into<String>, action: &CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.encode())
}

pub fn keyboard_stats(keyboard: &InlineKeyboardMarkup) -> (usize, usize) {
    let rows = keyboard.inline_keyboard.len();
    let buttons = keyboard.inline_keyboard.iter().map(|row| row.len()).sum();
    (rows, buttons)
}

/// Navigation row attached to a published carousel post.
///
/// # Layout
/// ```text
/// [⬅️ Previous] [Next ➡️]
/// ```
/// A button at the sequence boundary keeps its place as a `·` placeholder
/// that answers with the `noop` payload.
pub fn nav_keyboard(nav: &NavControl, lang: &LanguageIdentifier) -> InlineKeyboardMarkup {
    let label = |button: &NavButton, key: &str| {
        if button.is_enabled() {
            i18n::t(lang, key)
        } else {
            i18n::t(lang, "button-disabled")
        }
    };

    InlineKeyboardMarkup::new(vec![vec![
        cb(label(&nav.prev, "button-prev"), &nav.prev.action()),
        cb(label(&nav.next, "button-next"), &nav.next.action()),
    ]])
}

/// Menu shown after each saved slide and on `/done`.
///
/// # Layout
/// ```text
/// [➕ Add another photo]   (only below the slide cap)
/// [📤 Post to channel]
/// [♻️ Start over]
/// ```
pub fn after_save_keyboard(slide_count: usize, lang: &LanguageIdentifier) -> InlineKeyboardMarkup {
    let mut rows = Vec::with_capacity(3);
    if slide_count < MAX_SLIDES {
        rows.push(vec![cb(i18n::t(lang, "button-more"), &CallbackAction::More)]);
    }
    rows.push(vec![cb(i18n::t(lang, "button-publish"), &CallbackAction::Publish)]);
    rows.push(vec![cb(i18n::t(lang, "button-reset"), &CallbackAction::Reset)]);

    InlineKeyboardMarkup::new(rows)
}
