//! TCP byte bridge: a host stand-in for the serial link.
//!
//! On the board, key frames arrive over a UART and a receive interrupt pushes
//! each byte into the input ring. On the host, any number of TCP clients can
//! connect and write raw bytes; every byte received is forwarded unchanged,
//! in arrival order per client, to the same ring.
//!
//! There is no protocol beyond the 3-byte `[player, key, state]` frames the
//! engine already decodes. A client that sends a partial frame just leaves the
//! decoder waiting for the rest, exactly as a noisy serial line would.
//!
//! # Environment Variables
//!
//! - `DUEL_TETRIS_BRIDGE_HOST`: bind address (default: "127.0.0.1")
//! - `DUEL_TETRIS_BRIDGE_PORT`: port (default: 7878)
//! - `DUEL_TETRIS_BRIDGE_DISABLED`: set to "1" or "true" to skip the bridge
//!
//! # Testing
//!
//! ```bash
//! # player 1 presses hard drop, then releases it
//! printf '\x01\x20\x01\x01\x20\x00' | nc 127.0.0.1 7878
//! ```

pub mod config;
pub mod runtime;
pub mod server;

pub use duel_tetris_input as input;
pub use duel_tetris_types as types;

pub use config::BridgeConfig;
pub use runtime::Bridge;
pub use server::{run_bridge, READ_CHUNK};
