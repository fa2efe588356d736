//! Bridge runtime integration.
//!
//! Owns a tokio runtime so the synchronous game loop can poll for bytes
//! without ever awaiting.

use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

use crate::config::BridgeConfig;
use crate::input::ByteProducer;
use crate::server::run_bridge;

/// Running bridge instance
pub struct Bridge {
    _rt: Runtime,
    bytes_rx: mpsc::Receiver<Vec<u8>>,
    local_addr: SocketAddr,
}

impl Bridge {
    /// Start the bridge from environment variables.
    ///
    /// Returns None if `DUEL_TETRIS_BRIDGE_DISABLED` is set or the runtime
    /// cannot be created.
    pub fn start_from_env() -> Option<Self> {
        if BridgeConfig::is_disabled() {
            return None;
        }
        match Self::start(BridgeConfig::from_env()) {
            Ok(bridge) => Some(bridge),
            Err(e) => {
                warn!(error = %e, "byte bridge not started");
                None
            }
        }
    }

    /// Start the server and wait until it is listening.
    pub fn start(config: BridgeConfig) -> Result<Self> {
        let (bytes_tx, bytes_rx) = mpsc::channel::<Vec<u8>>(config.max_pending_chunks.max(1));
        let (ready_tx, ready_rx) = oneshot::channel::<SocketAddr>();
        let rt = Runtime::new()?;
        rt.spawn(async move {
            if let Err(e) = run_bridge(config, bytes_tx, Some(ready_tx)).await {
                error!(error = %e, "byte bridge stopped");
            }
        });
        // The sender is dropped without a value if binding failed.
        let local_addr = rt
            .block_on(ready_rx)
            .map_err(|_| anyhow!("byte bridge failed to bind"))?;
        Ok(Self {
            _rt: rt,
            bytes_rx,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Next received chunk, if any
    pub fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.bytes_rx.try_recv().ok()
    }

    /// Move every pending byte into the ring. Bytes that do not fit are
    /// dropped (and counted) by the ring. Returns the number of bytes accepted.
    pub fn pump(&mut self, producer: &mut ByteProducer) -> usize {
        let mut accepted = 0;
        while let Some(chunk) = self.try_recv() {
            accepted += producer.push_slice(&chunk);
        }
        accepted
    }
}
