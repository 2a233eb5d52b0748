//! Bridge error taxonomy
//!
//! Preconditions fail before any network call; transaction failures carry the
//! underlying cause and are never retried here.

use solana_sdk::signature::Signature;
use thiserror::Error;

use crate::orchestrator::InitStep;

/// Errors surfaced by bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("not in a game")]
    NotInGame,

    #[error("already in a game")]
    AlreadyInGame,

    #[error("player is not initialized")]
    NotInitialized,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("rpc transport error: {0}")]
    Transport(String),

    #[error("transaction {signature} failed: {reason}")]
    TransactionFailed { signature: Signature, reason: String },

    #[error("transaction {0} was not confirmed in time")]
    ConfirmationTimeout(Signature),

    #[error("transaction signing failed: {0}")]
    Signing(String),

    #[error("account data malformed: {0}")]
    Deserialize(String),

    #[error("initialization failed at step {step}: {source}")]
    InitIncomplete {
        step: InitStep,
        #[source]
        source: Box<BridgeError>,
    },
}

impl BridgeError {
    /// True for errors raised before any transaction was submitted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BridgeError::NotInGame | BridgeError::AlreadyInGame | BridgeError::NotInitialized
        )
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_classification() {
        assert!(BridgeError::NotInGame.is_precondition());
        assert!(BridgeError::AlreadyInGame.is_precondition());
        assert!(!BridgeError::Transport("boom".into()).is_precondition());
    }

    #[test]
    fn init_incomplete_names_the_step() {
        let err = BridgeError::InitIncomplete {
            step: InitStep::World,
            source: Box::new(BridgeError::Transport("connection refused".into())),
        };
        let msg = err.to_string();
        assert!(msg.contains("create world"));
        assert!(msg.contains("connection refused"));
    }
}
