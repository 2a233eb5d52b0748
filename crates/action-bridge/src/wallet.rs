//! Signing authority seam
//!
//! The bridge never holds private key material itself; it consumes a signing
//! capability behind the [`Wallet`] trait so alternative backends (hardware,
//! remote signer, browser wallet shim) can be injected at construction.

use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};

use crate::error::{BridgeError, Result};

/// External signing authority
pub trait Wallet: Send + Sync {
    /// Public key used as transaction authority
    fn pubkey(&self) -> Pubkey;

    /// Sign a transaction against its recorded recent blockhash
    fn sign_transaction(&self, tx: Transaction) -> Result<Transaction>;
}

/// Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Build from the 64-byte secret+public representation (id.json format)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let keypair = Keypair::from_bytes(bytes)
            .map_err(|e| BridgeError::Config(format!("invalid keypair bytes: {e}")))?;
        Ok(Self::new(keypair))
    }
}

impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(&self, mut tx: Transaction) -> Result<Transaction> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[&self.keypair], blockhash)
            .map_err(|e| BridgeError::Signing(e.to_string()))?;
        Ok(tx)
    }
}
