//! Integration tests for publishing and paging
//!
//! Drives `publish` and `navigate` against the in-memory registry and a
//! recording transport.
//! Run with: cargo test --test paging_test

#![allow(clippy::unwrap_used)]

mod mocks;

use std::sync::Arc;

use carousel_bot::carousel::registry::store_fresh_with;
use carousel_bot::carousel::{
    navigate, publish, CallbackAction, CarouselKey, CarouselStore, CollectRejection, CollectionSession,
    InMemoryCarouselStore, NavButton, NavigationOutcome, PhotoRef, PhotoSubmission, PostHandle, PublishError,
    RenderedPage, Slide, TransportError,
};
use mocks::{RecordingTransport, CHANNEL_CHAT_ID};
use pretty_assertions::assert_eq;

fn session_with(captions: &[&str]) -> CollectionSession {
    let mut session = CollectionSession::new();
    session.start();
    for (i, caption) in captions.iter().enumerate() {
        session
            .accept_photo(PhotoSubmission::single(PhotoRef::new(format!("P{}", i + 1))))
            .unwrap();
        session.accept_text(caption).unwrap();
    }
    session
}

fn next_target(page: &RenderedPage) -> (CarouselKey, i64) {
    match page.nav.next.action() {
        CallbackAction::Navigate { key, index } => (key, index),
        other => panic!("next button is not a navigation: {other:?}"),
    }
}

#[tokio::test]
async fn test_publish_two_slides_renders_first_page() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();

    let published = publish(&session_with(&["A", "B"]), &store, &transport).await.unwrap();

    assert_eq!(published.total, 2);
    assert_eq!(published.post.chat_id, CHANNEL_CHAT_ID);
    assert_eq!(store.len().await, 1);

    let stored = store.get(&published.key).await.unwrap();
    assert_eq!(
        stored.to_vec(),
        vec![
            Slide::new(PhotoRef::new("P1"), "A"),
            Slide::new(PhotoRef::new("P2"), "B"),
        ]
    );

    let sends = transport.sends();
    assert_eq!(sends.len(), 1);
    let (_, page) = &sends[0];
    assert_eq!(page.photo, PhotoRef::new("P1"));
    assert_eq!(page.caption_text(), "A\n\n1/2");
    assert_eq!(page.nav.prev, NavButton::Disabled);
    assert_eq!(next_target(page), (published.key.clone(), 1));
}

#[tokio::test]
async fn test_next_then_boundary() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();
    let published = publish(&session_with(&["A", "B"]), &store, &transport).await.unwrap();

    let outcome = navigate(&store, &transport, published.post, &published.key, 1).await;
    assert_eq!(outcome, NavigationOutcome::Rendered { index: 1, total: 2 });

    let page = transport.current_page(published.post).unwrap();
    assert_eq!(page.photo, PhotoRef::new("P2"));
    assert_eq!(page.caption_text(), "B\n\n2/2");
    assert!(page.nav.prev.is_enabled());
    assert_eq!(page.nav.next, NavButton::Disabled);
    assert_eq!(page.nav.next.action(), CallbackAction::Noop);
}

#[tokio::test]
async fn test_publish_without_slides_is_rejected() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();

    let err = publish(&session_with(&[]), &store, &transport).await.unwrap_err();

    assert!(matches!(err, PublishError::Rejected(CollectRejection::NoSlides)));
    assert_eq!(store.len().await, 0);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_each_publish_creates_independent_entry() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();
    let session = session_with(&["A"]);

    let first = publish(&session, &store, &transport).await.unwrap();
    let second = publish(&session, &store, &transport).await.unwrap();

    assert_ne!(first.key, second.key);
    assert_ne!(first.post, second.post);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_failed_send_keeps_registry_entry() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::failing_sends();

    let err = publish(&session_with(&["A", "B", "C"]), &store, &transport).await.unwrap_err();

    let PublishError::Transport { key, source } = err else {
        panic!("expected a transport failure");
    };
    assert!(matches!(source, TransportError::Rejected(_)));
    assert_eq!(store.get(&key).await.map(|slides| slides.len()), Some(3));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_key_is_not_found_without_edit() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();
    let post = PostHandle {
        chat_id: CHANNEL_CHAT_ID,
        message_id: 7,
    };

    let outcome = navigate(&store, &transport, post, &CarouselKey::parse("gone1234").unwrap(), 0).await;

    assert_eq!(outcome, NavigationOutcome::NotFound);
    assert!(transport.edits().is_empty());
}

#[tokio::test]
async fn test_out_of_range_index_is_clamped() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();
    let published = publish(&session_with(&["a", "b", "c"]), &store, &transport).await.unwrap();

    for (requested, shown) in [(-1, 0), (i64::MIN, 0), (3, 2), (99, 2)] {
        let outcome = navigate(&store, &transport, published.post, &published.key, requested).await;
        assert_eq!(outcome, NavigationOutcome::Rendered { index: shown, total: 3 });
    }

    let edits = transport.edits();
    assert_eq!(edits[0].1.caption_text(), "a\n\n1/3");
    assert_eq!(edits[2].1.caption_text(), "c\n\n3/3");
    assert_eq!(edits[0].1, edits[1].1);
    assert_eq!(edits[2].1, edits[3].1);
}

#[tokio::test]
async fn test_repeated_navigation_is_idempotent() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();
    let published = publish(&session_with(&["a", "b", "c"]), &store, &transport).await.unwrap();

    for _ in 0..3 {
        navigate(&store, &transport, published.post, &published.key, 1).await;
    }

    let edits = transport.edits();
    assert_eq!(edits.len(), 3);
    assert!(edits.iter().all(|(post, page)| *post == published.post && *page == edits[0].1));
    assert_eq!(edits[0].1.caption_text(), "b\n\n2/3");
}

#[tokio::test]
async fn test_failed_edit_leaves_last_rendered_page() {
    let store = InMemoryCarouselStore::new();
    let transport = RecordingTransport::new();
    let published = publish(&session_with(&["a", "b"]), &store, &transport).await.unwrap();

    transport.set_fail_edits(true);
    let outcome = navigate(&store, &transport, published.post, &published.key, 1).await;

    assert!(matches!(outcome, NavigationOutcome::EditFailed(TransportError::Network(_))));
    let page = transport.current_page(published.post).unwrap();
    assert_eq!(page.caption_text(), "a\n\n1/2");
}

#[tokio::test]
async fn test_key_collision_is_retried() {
    let store = InMemoryCarouselStore::new();
    let slides: Arc<[Slide]> = vec![Slide::new(PhotoRef::new("P1"), "A")].into();
    let taken = CarouselKey::parse("taken123").unwrap();
    let fresh = CarouselKey::parse("fresh123").unwrap();

    assert!(store.insert_if_vacant(taken.clone(), Arc::clone(&slides)).await);

    let mut keys = vec![fresh.clone(), taken.clone()];
    let key = store_fresh_with(&store, slides, || keys.pop().unwrap()).await.unwrap();

    assert_eq!(key, fresh);
    assert_eq!(store.len().await, 2);
}
