//! # Actor Runtime
//!
//! Runtime plumbing shared by the connection tasks and their hosts:
//! - **Logging macros**: one place that decides how the client logs
//! - **ChannelObserver**: an [`Observer`](core_types::Observer) that turns
//!   callbacks into a stream of [`DeviceEvent`](core_types::DeviceEvent)s

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod channels;
pub mod logging;

pub use channels::{ChannelObserver, EVENT_CHANNEL_CAPACITY};

#[doc(hidden)]
pub use tracing;
