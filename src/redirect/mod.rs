//! Canonical host enforcement module
//!
//! Rewrites legacy/alternate hostnames to the canonical production domain.
//! The rule table is built once at startup and is immutable afterwards.

pub mod normalizer;
pub mod rules;

// Re-export the main entry points
pub use normalizer::redirect_location;
pub use rules::{RedirectRule, RuleSet};
