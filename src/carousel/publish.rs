//! Publishing and paging
//!
//! `publish` freezes a session into the registry and posts page 0 to the
//! channel. `navigate` re-renders an existing channel post in place for any
//! viewer. Storage and the first render are not transactional: if the post
//! fails the registry entry simply stays unreachable until restart.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::registry::{store_fresh, CarouselKey, CarouselStore, RegistryError};
use super::render::{render_page, RenderedPage};
use super::session::{CollectRejection, CollectionSession};
use crate::core::metrics;

/// A message posted by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostHandle {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The platform refused the request (e.g. the bot is not a channel admin).
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Outbound side of the paging protocol.
#[async_trait]
pub trait CarouselTransport: Send + Sync {
    /// Posts a page as a new photo message in the channel.
    async fn send_page(&self, page: &RenderedPage) -> Result<PostHandle, TransportError>;

    /// Replaces photo, caption and buttons of an existing post.
    ///
    /// Re-rendering identical content must succeed.
    async fn edit_page(&self, post: PostHandle, page: &RenderedPage) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub key: CarouselKey,
    pub post: PostHandle,
    pub total: usize,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Rejected(#[from] CollectRejection),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("carousel {key} stored but could not be posted: {source}")]
    Transport {
        key: CarouselKey,
        #[source]
        source: TransportError,
    },
}

/// Freezes the session's slides under a fresh key and posts page 0.
pub async fn publish<S, T>(session: &CollectionSession, store: &S, transport: &T) -> Result<Published, PublishError>
where
    S: CarouselStore + ?Sized,
    T: CarouselTransport + ?Sized,
{
    let slides: Arc<[_]> = session.freeze()?.into();
    let total = slides.len();
    let key = store_fresh(store, Arc::clone(&slides)).await?;
    log::info!("Stored carousel {} with {} slide(s)", key, total);

    let Some(page) = render_page(&key, &slides, 0) else {
        return Err(CollectRejection::NoSlides.into());
    };

    match transport.send_page(&page).await {
        Ok(post) => {
            metrics::CAROUSELS_PUBLISHED_TOTAL.inc();
            log::info!(
                "Published carousel {} as message {} in chat {}",
                key,
                post.message_id,
                post.chat_id
            );
            Ok(Published { key, post, total })
        }
        Err(source) => {
            metrics::PUBLISH_FAILURES_TOTAL.inc();
            log::error!("Failed to post carousel {}: {}", key, source);
            Err(PublishError::Transport { key, source })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Rendered { index: usize, total: usize },
    /// Key unknown, e.g. the process restarted since publishing.
    NotFound,
    /// The edit failed; the post keeps its last rendered page.
    EditFailed(TransportError),
}

impl NavigationOutcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Rendered { .. } => "rendered",
            Self::NotFound => "not_found",
            Self::EditFailed(_) => "edit_failed",
        }
    }
}

/// Shows page `index` (clamped) of carousel `key` in `post`.
pub async fn navigate<S, T>(
    store: &S,
    transport: &T,
    post: PostHandle,
    key: &CarouselKey,
    index: i64,
) -> NavigationOutcome
where
    S: CarouselStore + ?Sized,
    T: CarouselTransport + ?Sized,
{
    let outcome = match store.get(key).await.and_then(|slides| render_page(key, &slides, index)) {
        None => {
            log::debug!("Navigation on unknown carousel {}", key);
            NavigationOutcome::NotFound
        }
        Some(page) => match transport.edit_page(post, &page).await {
            Ok(()) => NavigationOutcome::Rendered {
                index: page.index,
                total: page.total,
            },
            Err(e) => {
                log::warn!(
                    "Failed to show page {} of carousel {} in message {}: {}",
                    page.index,
                    key,
                    post.message_id,
                    e
                );
                NavigationOutcome::EditFailed(e)
            }
        },
    };

    metrics::NAVIGATIONS_TOTAL.with_label_values(&[outcome.label()]).inc();
    outcome
}
