//! Log setup for the simulator.
//!
//! The terminal belongs to the viewer, so log lines go to a file:
//! `DUEL_TETRIS_LOG_PATH` (default `duel-tetris.log`), filtered at
//! `DUEL_TETRIS_LOG_LEVEL` (default `info`).

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_LOG_PATH: &str = "duel-tetris.log";

/// Parse a level name; unknown names fall back to `info`.
pub fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(Level::INFO)
}

pub fn setup_logging() -> Result<()> {
    let path = env::var("DUEL_TETRIS_LOG_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());
    let level = parse_level(env::var("DUEL_TETRIS_LOG_LEVEL").ok().as_deref());

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .finish()
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_level(Some(" WARN ")), Level::WARN);
        assert_eq!(parse_level(Some("chatty")), Level::INFO);
        assert_eq!(parse_level(None), Level::INFO);
    }
}
