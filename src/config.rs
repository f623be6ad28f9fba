//! Server configuration from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Optional JSON snapshot loaded into the store at startup
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let seed_path = std::env::var("HEINOUS_SEED_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        tracing::info!(port, seed = ?seed_path, "Server config loaded");

        Self { port, seed_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var("PORT");
        std::env::remove_var("HEINOUS_SEED_FILE");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed_path.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("PORT", "8123");
        std::env::set_var("HEINOUS_SEED_FILE", "data/seed.json");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8123);
        assert_eq!(config.seed_path, Some(PathBuf::from("data/seed.json")));

        std::env::remove_var("PORT");
        std::env::remove_var("HEINOUS_SEED_FILE");
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        std::env::set_var("PORT", "not-a-port");
        assert_eq!(ServerConfig::from_env().port, DEFAULT_PORT);
        std::env::remove_var("PORT");
    }
}
