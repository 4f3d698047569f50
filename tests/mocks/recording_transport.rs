//! Recording transport for integration tests
//!
//! Keeps every page it was asked to post or edit and can be switched into
//! failure modes that imitate a bot without admin rights in the channel.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use carousel_bot::carousel::{CarouselTransport, PostHandle, RenderedPage, TransportError};

/// Chat id every recorded post lands in
pub const CHANNEL_CHAT_ID: i64 = -100_123_456_789;

/// One call received by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Send { post: PostHandle, page: RenderedPage },
    Edit { post: PostHandle, page: RenderedPage },
}

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportCall>>,
    fail_sends: AtomicBool,
    fail_edits: AtomicBool,
    next_message_id: AtomicI32,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(1),
            ..Self::default()
        }
    }

    /// Every send is rejected like a post into a channel the bot cannot write to
    pub fn failing_sends() -> Self {
        let transport = Self::new();
        transport.set_fail_sends(true);
        transport
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Pages posted as new messages, with their handles
    pub fn sends(&self) -> Vec<(PostHandle, RenderedPage)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Send { post, page } => Some((post, page)),
                TransportCall::Edit { .. } => None,
            })
            .collect()
    }

    /// Pages rendered into existing messages
    pub fn edits(&self) -> Vec<(PostHandle, RenderedPage)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Edit { post, page } => Some((post, page)),
                TransportCall::Send { .. } => None,
            })
            .collect()
    }

    /// The page a message currently shows, following sends and edits
    pub fn current_page(&self, post: PostHandle) -> Option<RenderedPage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Send { post: p, page } | TransportCall::Edit { post: p, page } if p == post => {
                    Some(page)
                }
                _ => None,
            })
            .last()
    }
}

#[async_trait]
impl CarouselTransport for RecordingTransport {
    async fn send_page(&self, page: &RenderedPage) -> Result<PostHandle, TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected(
                "Bad Request: need administrator rights in the channel chat".to_string(),
            ));
        }

        let post = PostHandle {
            chat_id: CHANNEL_CHAT_ID,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
        };
        self.calls.lock().unwrap().push(TransportCall::Send {
            post,
            page: page.clone(),
        });
        Ok(post)
    }

    async fn edit_page(&self, post: PostHandle, page: &RenderedPage) -> Result<(), TransportError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(TransportError::Network("connection reset".to_string()));
        }

        self.calls.lock().unwrap().push(TransportCall::Edit {
            post,
            page: page.clone(),
        });
        Ok(())
    }
}
