//! Dual-Layer Connection Manager
//!
//! Holds one session per ledger layer and performs the sign/submit/confirm
//! cycle against whichever layer the caller routes to. The routing policy is
//! fixed: setup and delegation traffic goes to the base layer, gameplay
//! systems go to the rollup.

use std::sync::Arc;
use std::time::Duration;

use bolt_world::NetworkEnv;
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

use crate::error::{BridgeError, Result};
use crate::rpc::{AccountSnapshot, HttpLedgerRpc, LedgerRpc};
use crate::wallet::Wallet;

/// Poll interval while waiting for confirmation
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(400);
/// Polls before a submission counts as timed out (~30s)
const CONFIRM_MAX_POLLS: u32 = 75;

/// Which ledger layer a call is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Authoritative, fee-paying layer for setup and delegation
    Base,
    /// Validator-operated layer for fee-less gameplay systems
    Rollup,
}

/// Session status exposed to the consumer boundary
#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    pub authority: Pubkey,
    pub base_url: String,
    pub rollup_url: String,
}

/// Two authenticated ledger sessions plus the shared signing authority
pub struct ConnectionManager {
    base: Arc<dyn LedgerRpc>,
    rollup: Arc<dyn LedgerRpc>,
    wallet: Arc<dyn Wallet>,
}

impl ConnectionManager {
    pub fn new(base: Arc<dyn LedgerRpc>, rollup: Arc<dyn LedgerRpc>, wallet: Arc<dyn Wallet>) -> Self {
        Self { base, rollup, wallet }
    }

    /// Build HTTP sessions for both layers of a named environment.
    ///
    /// Malformed endpoint URLs fail here, before any network access.
    pub fn for_env(env: NetworkEnv, wallet: Arc<dyn Wallet>) -> Result<Self> {
        let base = HttpLedgerRpc::new(&env.base().rpc_url)?;
        let rollup = HttpLedgerRpc::new(&env.rollup().rpc_url)?;
        Ok(Self::new(Arc::new(base), Arc::new(rollup), wallet))
    }

    fn rpc(&self, layer: Layer) -> &Arc<dyn LedgerRpc> {
        match layer {
            Layer::Base => &self.base,
            Layer::Rollup => &self.rollup,
        }
    }

    /// Transaction authority for everything this session submits
    pub fn authority(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            authority: self.wallet.pubkey(),
            base_url: self.base.url().to_string(),
            rollup_url: self.rollup.url().to_string(),
        }
    }

    /// Sign the instructions against a fresh blockhash from the target layer,
    /// submit, and await confirmation.
    pub async fn submit(&self, layer: Layer, instructions: &[Instruction]) -> Result<Signature> {
        let rpc = self.rpc(layer);
        let authority = self.wallet.pubkey();

        let blockhash = rpc.latest_blockhash().await?;
        let message = Message::new_with_blockhash(instructions, Some(&authority), &blockhash);
        let tx = self.wallet.sign_transaction(Transaction::new_unsigned(message))?;

        let signature = rpc.send_transaction(&tx).await?;
        tracing::debug!(%signature, layer = ?layer, "transaction submitted");

        self.confirm(rpc, &signature).await?;
        Ok(signature)
    }

    async fn confirm(&self, rpc: &Arc<dyn LedgerRpc>, signature: &Signature) -> Result<()> {
        for _ in 0..CONFIRM_MAX_POLLS {
            if let Some(status) = rpc.signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(BridgeError::TransactionFailed {
                        signature: *signature,
                        reason: err,
                    });
                }
                if status.confirmed {
                    tracing::debug!(%signature, slot = status.slot, "transaction confirmed");
                    return Ok(());
                }
            }
            tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
        }
        Err(BridgeError::ConfirmationTimeout(*signature))
    }

    /// Read an account from the given layer
    pub async fn account_info(&self, layer: Layer, pubkey: &Pubkey) -> Result<Option<AccountSnapshot>> {
        self.rpc(layer).account_info(pubkey).await
    }

    /// Whether an account exists on the given layer
    pub async fn account_exists(&self, layer: Layer, pubkey: &Pubkey) -> Result<bool> {
        Ok(self.account_info(layer, pubkey).await?.is_some())
    }
}
