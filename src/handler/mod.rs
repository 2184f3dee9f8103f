//! Request handler module
//!
//! Responsible for the pre-routing canonical-host hook and request
//! dispatch.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
