//! Page rendering for published carousels
//!
//! A page is one slide shown as a photo whose caption ends with a styled
//! `i/total` line, plus a navigation row that always holds exactly two
//! buttons (previous, next). A button past either edge is replaced with a
//! disabled placeholder so the layout never jumps.

use teloxide::utils::html;

use super::action::CallbackAction;
use super::registry::CarouselKey;
use super::slide::{PhotoRef, Slide};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavButton {
    Go(CallbackAction),
    Disabled,
}

impl NavButton {
    /// Payload carried by the button; disabled buttons send `noop`.
    pub fn action(&self) -> CallbackAction {
        match self {
            Self::Go(action) => action.clone(),
            Self::Disabled => CallbackAction::Noop,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Go(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavControl {
    pub prev: NavButton,
    pub next: NavButton,
}

impl NavControl {
    pub fn for_page(key: &CarouselKey, index: usize, total: usize) -> Self {
        let prev = if index > 0 {
            NavButton::Go(CallbackAction::navigate(key.clone(), index - 1))
        } else {
            NavButton::Disabled
        };
        let next = if index + 1 < total {
            NavButton::Go(CallbackAction::navigate(key.clone(), index + 1))
        } else {
            NavButton::Disabled
        };
        Self { prev, next }
    }

    pub fn buttons(&self) -> [&NavButton; 2] {
        [&self.prev, &self.next]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub photo: PhotoRef,
    /// Caption as stored by the user, unescaped.
    pub caption: String,
    pub index: usize,
    pub total: usize,
    pub nav: NavControl,
}

impl RenderedPage {
    /// Caption sent with `ParseMode::Html`.
    pub fn caption_html(&self) -> String {
        format!("{}\n\n<i>{}/{}</i>", html::escape(&self.caption), self.index + 1, self.total)
    }

    /// What a viewer reads once Telegram applies the markup.
    pub fn caption_text(&self) -> String {
        format!("{}\n\n{}/{}", self.caption, self.index + 1, self.total)
    }
}

/// Clamps any requested index into `[0, total - 1]`. `total` must be non-zero.
pub fn clamp_index(index: i64, total: usize) -> usize {
    let last = total.saturating_sub(1);
    usize::try_from(index.max(0)).map_or(last, |i| i.min(last))
}

/// Renders page `index` (clamped) of a carousel. `None` for an empty slide list.
pub fn render_page(key: &CarouselKey, slides: &[Slide], index: i64) -> Option<RenderedPage> {
    if slides.is_empty() {
        return None;
    }
    let total = slides.len();
    let index = clamp_index(index, total);
    let slide = &slides[index];

    Some(RenderedPage {
        photo: slide.photo.clone(),
        caption: slide.caption.clone(),
        index,
        total,
        nav: NavControl::for_page(key, index, total),
    })
}
