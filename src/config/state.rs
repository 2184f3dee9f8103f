// Application state module
// Holds the loaded configuration and the startup-built redirect rules

use crate::redirect::RuleSet;

use super::types::Config;

/// Shared application state
///
/// Everything here is read-only after startup, so request handling needs
/// no locking. The redirect rule table is built exactly once.
pub struct AppState {
    pub config: Config,
    pub rules: RuleSet,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            rules: RuleSet::from_config(&config.redirect),
        }
    }
}
