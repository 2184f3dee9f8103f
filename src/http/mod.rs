//! HTTP protocol layer module
//!
//! Provides HTTP response building, decoupled from routing and redirect
//! logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_404_response, build_405_response, build_413_response,
    build_health_response, build_options_response,
};
