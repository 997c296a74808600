//! Clients for services outside the process.

pub mod client;
pub mod fcm;
