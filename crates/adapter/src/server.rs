//! Async TCP server that forwards raw client bytes to the game loop.

use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;

/// Bytes read from a client socket per syscall
pub const READ_CHUNK: usize = 256;

/// Accept clients forever, forwarding each chunk they send on `bytes_tx`.
///
/// `ready_tx` receives the bound address once the listener is up, which lets
/// callers bind port 0 and learn the real port.
pub async fn run_bridge(
    config: BridgeConfig,
    bytes_tx: mpsc::Sender<Vec<u8>>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "byte bridge listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut next_id = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        next_id += 1;
        let client = next_id;
        info!(client, %addr, "bridge client connected");

        let tx = bytes_tx.clone();
        tokio::spawn(async move {
            match forward_client(socket, tx).await {
                Ok(total) => info!(client, total, "bridge client disconnected"),
                Err(e) => warn!(client, error = %e, "bridge client failed"),
            }
        });
    }
}

/// Copy one client's bytes until EOF or until the game loop goes away.
async fn forward_client(mut socket: TcpStream, tx: mpsc::Sender<Vec<u8>>) -> anyhow::Result<u64> {
    let mut buf = [0u8; READ_CHUNK];
    let mut total = 0u64;
    loop {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(total);
        }
        total += n as u64;
        if tx.send(buf[..n].to_vec()).await.is_err() {
            debug!("game loop closed, dropping client");
            return Ok(total);
        }
    }
}
