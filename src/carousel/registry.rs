//! Published carousel registry
//!
//! Maps a short random key to the frozen slide list of one published post.
//! Entries are insert-only and live for the lifetime of the process.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;

use super::slide::Slide;
use crate::core::config::carousel::{KEY_ATTEMPTS, KEY_LEN, KEY_MAX_LEN};

const KEY_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier correlating navigation buttons with their slide list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CarouselKey(String);

impl CarouselKey {
    /// Validates a key received in a button payload (ASCII alphanumerics only).
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty() && raw.len() <= KEY_MAX_LEN && raw.bytes().all(|b| b.is_ascii_alphanumeric());
        valid.then(|| Self(raw.to_string()))
    }

    /// Random lowercase base-36 token of [`KEY_LEN`] characters.
    pub fn generate() -> Self {
        let mut n: u64 = rand::random();
        let key = (0..KEY_LEN)
            .map(|_| {
                let digit = (n % 36) as usize;
                n /= 36;
                char::from(KEY_ALPHABET[digit])
            })
            .collect();
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CarouselKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no free carousel key after {0} attempts")]
    KeySpaceExhausted(usize),
}

#[async_trait]
pub trait CarouselStore: Send + Sync {
    /// Stores `slides` under `key` unless the key is taken. Returns whether it was stored.
    async fn insert_if_vacant(&self, key: CarouselKey, slides: Arc<[Slide]>) -> bool;

    async fn get(&self, key: &CarouselKey) -> Option<Arc<[Slide]>>;

    async fn len(&self) -> usize;
}

/// Stores `slides` under a freshly generated key.
pub async fn store_fresh<S>(store: &S, slides: Arc<[Slide]>) -> Result<CarouselKey, RegistryError>
where
    S: CarouselStore + ?Sized,
{
    store_fresh_with(store, slides, CarouselKey::generate).await
}

/// Like [`store_fresh`] with an explicit key source.
///
/// A taken key is regenerated up to [`KEY_ATTEMPTS`] times.
pub async fn store_fresh_with<S, G>(store: &S, slides: Arc<[Slide]>, mut next_key: G) -> Result<CarouselKey, RegistryError>
where
    S: CarouselStore + ?Sized,
    G: FnMut() -> CarouselKey + Send,
{
    for attempt in 1..=KEY_ATTEMPTS {
        let key = next_key();
        if store.insert_if_vacant(key.clone(), Arc::clone(&slides)).await {
            return Ok(key);
        }
        log::warn!("Carousel key collision on {} (attempt {}/{})", key, attempt, KEY_ATTEMPTS);
    }
    Err(RegistryError::KeySpaceExhausted(KEY_ATTEMPTS))
}

/// Process-memory registry. Never evicts.
#[derive(Default)]
pub struct InMemoryCarouselStore {
    carousels: DashMap<CarouselKey, Arc<[Slide]>>,
}

impl InMemoryCarouselStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarouselStore for InMemoryCarouselStore {
    async fn insert_if_vacant(&self, key: CarouselKey, slides: Arc<[Slide]>) -> bool {
        match self.carousels.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(slides);
                true
            }
        }
    }

    async fn get(&self, key: &CarouselKey) -> Option<Arc<[Slide]>> {
        self.carousels.get(key).map(|entry| Arc::clone(entry.value()))
    }

    async fn len(&self) -> usize {
        self.carousels.len()
    }
}
