//! Mock implementations for integration testing
//!
//! This module provides an in-memory carousel transport so the collection
//! flow and the paging protocol can be exercised without the Bot API.

pub mod recording_transport;

pub use recording_transport::{RecordingTransport, TransportCall, CHANNEL_CHAT_ID};
