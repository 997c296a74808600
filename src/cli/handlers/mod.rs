//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod receive;
pub mod send;
pub mod serve;

pub use receive::{ReceiveCommandHandler, ReceiveSummary, run_receive};
pub use send::{SEND_USAGE, SendCommandHandler};
pub use serve::ServeCommandHandler;
