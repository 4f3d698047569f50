//! Per-user collection state machine
//!
//! A session moves `idle -> collecting` on `/new` (or the restart button) and
//! accumulates up to [`MAX_SLIDES`] photo+caption pairs. Readiness to publish is
//! derived: the session is collecting and holds at least one slide.
//!
//! Every operation either applies a complete transition or returns a
//! [`CollectRejection`] and leaves the session untouched.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use super::slide::{PhotoRef, Slide, MAX_SLIDES};

/// Prefix that marks a message as a bot command.
pub const COMMAND_PREFIX: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CollectionState {
    #[default]
    Idle,
    Collecting,
}

/// User input that cannot be applied in the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectRejection {
    #[error("collection has not been started")]
    NotCollecting,
    #[error("albums are not accepted, photos must be sent one by one")]
    AlbumNotAccepted,
    #[error("the previous photo is still waiting for its caption")]
    CaptionPending,
    #[error("maximum of {max} slides reached", max = MAX_SLIDES)]
    MaxSlidesReached,
    #[error("no photo is waiting for a caption")]
    PhotoMissing,
    #[error("no slides collected yet")]
    NoSlides,
}

impl CollectRejection {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotCollecting => "not_collecting",
            Self::AlbumNotAccepted => "album",
            Self::CaptionPending => "caption_pending",
            Self::MaxSlidesReached => "max_slides",
            Self::PhotoMissing => "photo_missing",
            Self::NoSlides => "no_slides",
        }
    }
}

/// A received photo message, reduced to what the state machine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSubmission {
    /// Highest-resolution variant, `None` when the message carried no usable size.
    pub photo: Option<PhotoRef>,
    /// The photo arrived as part of a multi-photo album.
    pub in_album: bool,
}

impl PhotoSubmission {
    pub fn single(photo: PhotoRef) -> Self {
        Self {
            photo: Some(photo),
            in_album: false,
        }
    }

    pub fn album_item(photo: PhotoRef) -> Self {
        Self {
            photo: Some(photo),
            in_album: true,
        }
    }
}

/// Result of feeding free-form text into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionOutcome {
    /// Text is not meant for the collection flow (idle session or a command).
    Ignored,
    /// Caption stored as slide number `count`.
    Saved { count: usize, at_capacity: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSession {
    state: CollectionState,
    slides: Vec<Slide>,
    pending_photo: Option<PhotoRef>,
}

impl CollectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CollectionState {
        self.state
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn pending_photo(&self) -> Option<&PhotoRef> {
        self.pending_photo.as_ref()
    }

    pub fn is_full(&self) -> bool {
        self.slides.len() >= MAX_SLIDES
    }

    pub fn is_ready(&self) -> bool {
        self.state == CollectionState::Collecting && !self.slides.is_empty()
    }

    /// `/new`: starts a fresh collection from any state.
    pub fn start(&mut self) {
        self.clear();
        self.state = CollectionState::Collecting;
    }

    /// `/cancel`: drops everything and returns to idle.
    pub fn cancel(&mut self) {
        self.clear();
        self.state = CollectionState::Idle;
    }

    /// Restart button from the after-save menu. Same transition as [`start`](Self::start).
    pub fn reset(&mut self) {
        self.start();
    }

    /// Accepts a photo and makes it the pending one.
    ///
    /// Returns the number of the slide whose caption is now expected.
    pub fn accept_photo(&mut self, submission: PhotoSubmission) -> Result<usize, CollectRejection> {
        if self.state != CollectionState::Collecting {
            return Err(CollectRejection::NotCollecting);
        }
        if submission.in_album {
            return Err(CollectRejection::AlbumNotAccepted);
        }
        if self.pending_photo.is_some() {
            return Err(CollectRejection::CaptionPending);
        }
        if self.is_full() {
            return Err(CollectRejection::MaxSlidesReached);
        }
        let photo = submission.photo.ok_or(CollectRejection::PhotoMissing)?;

        self.pending_photo = Some(photo);
        Ok(self.slides.len() + 1)
    }

    /// Accepts free-form text as the caption for the pending photo.
    ///
    /// Command text never becomes a caption, even while one is pending.
    pub fn accept_text(&mut self, text: &str) -> Result<CaptionOutcome, CollectRejection> {
        if is_command(text) || self.state != CollectionState::Collecting {
            return Ok(CaptionOutcome::Ignored);
        }
        let photo = self.pending_photo.take().ok_or(CollectRejection::PhotoMissing)?;

        self.slides.push(Slide::new(photo, text.trim()));
        let count = self.slides.len();
        Ok(CaptionOutcome::Saved {
            count,
            at_capacity: count >= MAX_SLIDES,
        })
    }

    /// "Add another" button. Only checks capacity; the user stays in `collecting`.
    ///
    /// Returns the number of the next slide.
    pub fn request_more(&self) -> Result<usize, CollectRejection> {
        if self.is_full() {
            return Err(CollectRejection::MaxSlidesReached);
        }
        Ok(self.slides.len() + 1)
    }

    /// Copies the collected slides for publishing.
    pub fn freeze(&self) -> Result<Vec<Slide>, CollectRejection> {
        if self.slides.is_empty() {
            return Err(CollectRejection::NoSlides);
        }
        Ok(self.slides.clone())
    }

    fn clear(&mut self) {
        self.slides.clear();
        self.pending_photo = None;
    }
}

/// True when the text is addressed to the command dispatcher.
pub fn is_command(text: &str) -> bool {
    text.trim_start().starts_with(COMMAND_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn photo(id: &str) -> PhotoSubmission {
        PhotoSubmission::single(PhotoRef::new(id))
    }

    fn collecting_with(count: usize) -> CollectionSession {
        let mut session = CollectionSession::new();
        session.start();
        for i in 0..count {
            session.accept_photo(photo(&format!("p{}", i))).unwrap();
            session.accept_text(&format!("caption {}", i)).unwrap();
        }
        session
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = CollectionSession::new();
        assert_eq!(session.state(), CollectionState::Idle);
        assert_eq!(session.slide_count(), 0);
        assert!(session.pending_photo().is_none());
        assert!(!session.is_ready());
    }

    #[test]
    fn test_photo_rejected_when_idle() {
        let mut session = CollectionSession::new();
        assert_eq!(session.accept_photo(photo("p1")), Err(CollectRejection::NotCollecting));
        assert_eq!(session, CollectionSession::new());
    }

    #[test]
    fn test_photo_then_caption_appends_slide() {
        let mut session = collecting_with(0);
        assert_eq!(session.accept_photo(photo("p1")), Ok(1));
        assert_eq!(session.pending_photo(), Some(&PhotoRef::new("p1")));

        let outcome = session.accept_text("  Sunset  ").unwrap();
        assert_eq!(
            outcome,
            CaptionOutcome::Saved {
                count: 1,
                at_capacity: false
            }
        );
        assert_eq!(session.slides(), &[Slide::new(PhotoRef::new("p1"), "Sunset")]);
        assert!(session.pending_photo().is_none());
        assert!(session.is_ready());
    }

    #[test]
    fn test_second_photo_without_caption_rejected() {
        let mut session = collecting_with(0);
        session.accept_photo(photo("p1")).unwrap();
        assert_eq!(session.accept_photo(photo("p2")), Err(CollectRejection::CaptionPending));
        assert_eq!(session.pending_photo(), Some(&PhotoRef::new("p1")));

        session.accept_text("first").unwrap();
        assert_eq!(session.slides()[0].photo, PhotoRef::new("p1"));
    }

    #[test]
    fn test_seventh_photo_rejected() {
        let mut session = collecting_with(MAX_SLIDES);
        let before = session.clone();
        assert_eq!(session.accept_photo(photo("p7")), Err(CollectRejection::MaxSlidesReached));
        assert_eq!(session, before);
        assert_eq!(session.slide_count(), MAX_SLIDES);
    }

    #[test]
    fn test_sixth_caption_reports_capacity() {
        let mut session = collecting_with(MAX_SLIDES - 1);
        session.accept_photo(photo("last")).unwrap();
        assert_eq!(
            session.accept_text("last one").unwrap(),
            CaptionOutcome::Saved {
                count: MAX_SLIDES,
                at_capacity: true
            }
        );
    }

    #[test]
    fn test_album_rejected_regardless_of_capacity() {
        for count in 0..=MAX_SLIDES {
            let mut session = collecting_with(count);
            let before = session.clone();
            let result = session.accept_photo(PhotoSubmission::album_item(PhotoRef::new("a")));
            assert_eq!(result, Err(CollectRejection::AlbumNotAccepted), "count = {}", count);
            assert_eq!(session, before);
        }
    }

    #[test]
    fn test_photo_without_variants_rejected() {
        let mut session = collecting_with(1);
        let submission = PhotoSubmission {
            photo: None,
            in_album: false,
        };
        assert_eq!(session.accept_photo(submission), Err(CollectRejection::PhotoMissing));
        assert!(session.pending_photo().is_none());
    }

    #[test]
    fn test_text_ignored_when_idle() {
        let mut session = CollectionSession::new();
        assert_eq!(session.accept_text("hello"), Ok(CaptionOutcome::Ignored));
    }

    #[test]
    fn test_text_without_photo_rejected() {
        let mut session = collecting_with(2);
        assert_eq!(session.accept_text("orphan"), Err(CollectRejection::PhotoMissing));
        assert_eq!(session.slide_count(), 2);
    }

    #[test]
    fn test_command_text_never_becomes_caption() {
        let mut session = collecting_with(0);
        session.accept_photo(photo("p1")).unwrap();

        assert_eq!(session.accept_text("/done"), Ok(CaptionOutcome::Ignored));
        assert_eq!(session.accept_text("/unknown stuff"), Ok(CaptionOutcome::Ignored));
        assert_eq!(session.slide_count(), 0);
        assert_eq!(session.pending_photo(), Some(&PhotoRef::new("p1")));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut session = collecting_with(3);
        session.accept_photo(photo("pending")).unwrap();
        session.cancel();
        assert_eq!(session, CollectionSession::new());
    }

    #[test]
    fn test_reset_clears_slides_and_keeps_collecting() {
        let mut session = collecting_with(3);
        session.reset();
        assert_eq!(session.state(), CollectionState::Collecting);
        assert_eq!(session.slide_count(), 0);
        assert!(!session.is_ready());
        assert_eq!(session.freeze(), Err(CollectRejection::NoSlides));
    }

    #[test]
    fn test_start_discards_previous_collection() {
        let mut session = collecting_with(4);
        session.start();
        assert_eq!(session.slide_count(), 0);
        assert_eq!(session.state(), CollectionState::Collecting);
    }

    #[test]
    fn test_request_more() {
        assert_eq!(collecting_with(2).request_more(), Ok(3));
        assert_eq!(
            collecting_with(MAX_SLIDES).request_more(),
            Err(CollectRejection::MaxSlidesReached)
        );
    }

    #[test]
    fn test_freeze_copies_slides_in_order() {
        let session = collecting_with(3);
        let frozen = session.freeze().unwrap();
        let captions: Vec<_> = frozen.iter().map(|s| s.caption.as_str()).collect();
        assert_eq!(captions, vec!["caption 0", "caption 1", "caption 2"]);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(CollectionState::Idle.to_string(), "idle");
        assert_eq!(CollectionState::Collecting.to_string(), "collecting");
        assert_eq!("collecting".parse::<CollectionState>(), Ok(CollectionState::Collecting));
    }

    #[test]
    fn test_is_command() {
        assert!(is_command("/new"));
        assert!(is_command("  /cancel"));
        assert!(!is_command("caption with / inside"));
        assert!(!is_command(""));
    }
}
