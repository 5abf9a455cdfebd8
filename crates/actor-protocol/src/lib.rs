//! # Actor Protocol
//!
//! Shared vocabulary of the smart-home client.
//!
//! This crate has no runtime dependencies (no tokio, no I/O), which keeps
//! the state machine and error taxonomy testable in isolation.
//!
//! - **Command**: instructions sent to the controller
//! - **ConnectionState**: FSM state (pure logic, no side effects)
//! - **ClientError**: every failure, rendered as the status line users see

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod errors;
pub mod messages;
pub mod state;

pub use errors::ClientError;
pub use messages::Command;
pub use state::ConnectionState;
