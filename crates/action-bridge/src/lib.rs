//! Action Bridge - dual-layer gameplay bridge for the SolFPS client
//!
//! Drives the authoritative on-chain ECS from a latency-sensitive game loop:
//! - One-time setup (world, entity, components, delegation) on the base layer
//! - Per-frame gameplay systems on the fee-less rollup layer
//! - An optimistic local cache reconciled against confirmed state
//!
//! Construct a [`GameBridge`] with an injected [`Wallet`] and keep it owned by
//! the consumer; the [`global`] accessor exists only as a compatibility shim
//! for the embedded game runtime.

pub mod builder;
pub mod connection;
pub mod delegation;
pub mod error;
pub mod orchestrator;
pub mod reconcile;
pub mod rpc;
pub mod session;
pub mod state;
pub mod wallet;

#[cfg(test)]
mod tests;

pub use connection::{ConnectionManager, ConnectionStatus, Layer};
pub use delegation::DelegationManager;
pub use error::{BridgeError, Result};
pub use orchestrator::{InitCheckpoint, InitOrchestrator, InitStep};
pub use reconcile::spawn_reconciler;
pub use rpc::{AccountSnapshot, HttpLedgerRpc, LedgerRpc, TxStatus};
pub use session::{GameBridge, GameBridgeConfig};
pub use state::{GameState, SessionPhase};
pub use wallet::{KeypairWallet, Wallet};

/// Process-wide bridge lookup for the embedded game runtime.
///
/// The bridge itself is dependency-injected everywhere inside this crate;
/// this shim only exists so the wasm boundary can reach the instance the
/// host installed.
pub mod global {
    use super::session::GameBridge;
    use std::sync::{Arc, OnceLock};

    static BRIDGE: OnceLock<Arc<GameBridge>> = OnceLock::new();

    /// Install the process-wide bridge. Returns false if one is already set.
    pub fn install(bridge: Arc<GameBridge>) -> bool {
        BRIDGE.set(bridge).is_ok()
    }

    /// Look up the installed bridge, if any.
    pub fn bridge() -> Option<Arc<GameBridge>> {
        BRIDGE.get().cloned()
    }
}
