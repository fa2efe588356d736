//! Bridge configuration from the environment.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
    /// Max byte chunks queued between the server and the game loop
    pub max_pending_chunks: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_pending_chunks: 64,
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env::var("DUEL_TETRIS_BRIDGE_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("DUEL_TETRIS_BRIDGE_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host,
            port,
            ..defaults
        }
    }

    /// Whether `DUEL_TETRIS_BRIDGE_DISABLED` is set
    pub fn is_disabled() -> bool {
        env::var("DUEL_TETRIS_BRIDGE_DISABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bridge address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        let config = BridgeConfig::default();
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:7878".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = BridgeConfig {
            host: "not a host".to_string(),
            ..BridgeConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
