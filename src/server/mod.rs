//! Server module
//!
//! TCP listener setup and per-connection serving.

pub mod connection;
pub mod listener;

pub use connection::accept_connection;
pub use listener::create_reusable_listener;
