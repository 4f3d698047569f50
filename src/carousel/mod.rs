//! Carousel collection and paging
//!
//! - `session`: per-user collection state machine
//! - `registry`: process-wide table of published carousels
//! - `render` / `publish`: paging protocol over a channel transport

pub mod action;
pub mod publish;
pub mod registry;
pub mod render;
pub mod session;
pub mod session_store;
pub mod slide;

// Re-exports for convenience
pub use action::CallbackAction;
pub use publish::{navigate, publish, CarouselTransport, NavigationOutcome, PostHandle, PublishError, Published, TransportError};
pub use registry::{CarouselKey, CarouselStore, InMemoryCarouselStore};
pub use render::{render_page, NavButton, NavControl, RenderedPage};
pub use session::{CaptionOutcome, CollectRejection, CollectionSession, CollectionState, PhotoSubmission};
pub use session_store::{InMemorySessionStore, SessionStore, UserKey};
pub use slide::{PhotoRef, PhotoVariant, Slide, MAX_SLIDES};
