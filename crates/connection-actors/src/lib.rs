//! # Connection Actors
//!
//! Tasks that drive one device connection.
//!
//! ## Components
//!
//! - **ConnectionManager**: owns the state machine, opens transports and
//!   supersedes or tears down sessions
//! - **Read loop**: one per session; bytes → frames → events → observer
//! - **Sender**: serialized, fire-and-forget command writes

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod config;
pub mod constants;
mod manager;
mod read_loop;
mod sender;
mod session;

pub use config::ClientConfig;
pub use manager::ConnectionManager;
