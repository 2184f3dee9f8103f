// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RedirectConfig,
    RoutesConfig, ServerConfig,
};

impl Config {
    /// Load configuration from "config.toml" plus HOSTGATE_* environment
    /// variables (e.g. `HOSTGATE_REDIRECT.CANONICAL_HOST`)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("HOSTGATE"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("redirect.canonical_host", "business.ficoreafrica.com")?
            .set_default("redirect.legacy_suffixes", vec!["onrender.com".to_string()])?
            .set_default("redirect.alias_hosts", vec!["ficoreafrica.com".to_string()])?
            .set_default("redirect.default_scheme", "https")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_section() {
        // No config file named like this should exist; defaults must be
        // sufficient to produce a complete Config
        let cfg = Config::load_from("nonexistent-config-for-tests").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.redirect.canonical_host, "business.ficoreafrica.com");
        assert_eq!(cfg.redirect.legacy_suffixes, vec!["onrender.com"]);
        assert_eq!(cfg.redirect.default_scheme, "https");
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_socket_addr_parsing() {
        let cfg = Config::load_from("nonexistent-config-for-tests").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
