//! In-memory ledger doubles.
//!
//! A [`MockLedger`] records every accepted transaction and confirms it
//! instantly. A pair of mocks can share a delegation set: the base-side mock
//! executes delegation program instructions against it, the rollup-side mock
//! rejects system calls whose writable component accounts are not in it,
//! mirroring how a real validator refuses undelegated accounts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bolt_world::{component_pda, entity_pda, ComponentKind, DELEGATION_PROGRAM, SOLFPS_PROGRAM};
use parking_lot::Mutex;
use solana_sdk::{
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};

use crate::error::{BridgeError, Result};
use crate::rpc::{AccountSnapshot, LedgerRpc, TxStatus};
use crate::session::{GameBridge, GameBridgeConfig};
use crate::wallet::{KeypairWallet, Wallet};

pub type DelegationSet = Arc<Mutex<HashSet<Pubkey>>>;

pub struct MockLedger {
    url: String,
    sent: Mutex<Vec<Transaction>>,
    accounts: Mutex<HashMap<Pubkey, AccountSnapshot>>,
    delegations: Option<DelegationSet>,
    enforce_delegation: bool,
    /// Refuse every send once the accepted count reaches this threshold
    fail_from: Mutex<Option<usize>>,
}

impl MockLedger {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            sent: Mutex::new(Vec::new()),
            accounts: Mutex::new(HashMap::new()),
            delegations: None,
            enforce_delegation: false,
            fail_from: Mutex::new(None),
        }
    }

    /// Base-side role: execute delegation instructions against the shared set.
    pub fn tracking_delegations(mut self, set: DelegationSet) -> Self {
        self.delegations = Some(set);
        self
    }

    /// Rollup-side role: reject system calls touching undelegated accounts.
    pub fn enforcing_delegations(mut self, set: DelegationSet) -> Self {
        self.delegations = Some(set);
        self.enforce_delegation = true;
        self
    }

    pub fn fail_from(&self, accepted: usize) {
        *self.fail_from.lock() = Some(accepted);
    }

    pub fn clear_failures(&self) {
        *self.fail_from.lock() = None;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn set_account(&self, pubkey: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.accounts.lock().insert(
            pubkey,
            AccountSnapshot {
                lamports: 1_000_000,
                owner,
                data,
                executable: false,
            },
        );
    }

    /// Install a component account for an entity at its derived address.
    pub fn set_component(&self, entity: &Pubkey, component: ComponentKind, data: Vec<u8>) {
        let program = component.program_id();
        self.set_account(component_pda(&program, entity), program, data);
    }

    fn check_delegations(&self, message: &Message, signature: &Signature) -> Result<()> {
        let Some(set) = &self.delegations else {
            return Ok(());
        };
        for ix in &message.instructions {
            let program = message.account_keys[ix.program_id_index as usize];
            // Only Apply calls touch delegated state; setup never reaches here.
            if program != SOLFPS_PROGRAM || ix.data.first() != Some(&2) {
                continue;
            }
            for &index in &ix.accounts {
                let index = index as usize;
                if is_writable(message, index) && !is_signer(message, index) {
                    let key = message.account_keys[index];
                    if !set.lock().contains(&key) {
                        return Err(BridgeError::TransactionFailed {
                            signature: *signature,
                            reason: format!("account {key} is not delegated"),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_delegation_instructions(&self, message: &Message) {
        let Some(set) = &self.delegations else {
            return;
        };
        for ix in &message.instructions {
            let program = message.account_keys[ix.program_id_index as usize];
            if program != DELEGATION_PROGRAM {
                continue;
            }
            let delegated = message.account_keys[ix.accounts[1] as usize];
            match ix.data.first() {
                Some(0) => {
                    set.lock().insert(delegated);
                }
                Some(1) => {
                    set.lock().remove(&delegated);
                }
                _ => {}
            }
        }
    }
}

fn is_signer(message: &Message, index: usize) -> bool {
    index < message.header.num_required_signatures as usize
}

fn is_writable(message: &Message, index: usize) -> bool {
    let header = &message.header;
    let num_signers = header.num_required_signatures as usize;
    if index < num_signers {
        index < num_signers - header.num_readonly_signed_accounts as usize
    } else {
        index < message.account_keys.len() - header.num_readonly_unsigned_accounts as usize
    }
}

#[async_trait::async_trait]
impl LedgerRpc for MockLedger {
    fn url(&self) -> &str {
        &self.url
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature> {
        if let Some(threshold) = *self.fail_from.lock() {
            if self.sent.lock().len() >= threshold {
                return Err(BridgeError::Transport("mock ledger refused the transaction".into()));
            }
        }

        let signature = tx.signatures.first().copied().unwrap_or_default();
        if self.enforce_delegation {
            self.check_delegations(&tx.message, &signature)?;
        } else {
            self.apply_delegation_instructions(&tx.message);
        }
        self.sent.lock().push(tx.clone());
        Ok(signature)
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(Hash::new_unique())
    }

    async fn signature_status(&self, _signature: &Signature) -> Result<Option<TxStatus>> {
        Ok(Some(TxStatus {
            slot: 1,
            err: None,
            confirmed: true,
        }))
    }

    async fn account_info(&self, pubkey: &Pubkey) -> Result<Option<AccountSnapshot>> {
        Ok(self.accounts.lock().get(pubkey).cloned())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

// ============ Fixtures ============

pub fn test_wallet() -> Arc<dyn Wallet> {
    Arc::new(KeypairWallet::new(Keypair::new()))
}

pub struct TestHarness {
    pub bridge: GameBridge,
    pub base: Arc<MockLedger>,
    pub rollup: Arc<MockLedger>,
    pub validator: Pubkey,
}

impl TestHarness {
    pub fn entity(&self) -> Pubkey {
        entity_pda(1, 1)
    }
}

/// Bridge over plain mocks that accept everything.
pub fn harness() -> TestHarness {
    let base = Arc::new(MockLedger::new("http://base.mock"));
    let rollup = Arc::new(MockLedger::new("http://rollup.mock"));
    build_harness(base, rollup)
}

/// Bridge over mocks sharing a delegation set, with the rollup side
/// rejecting writes to undelegated component accounts.
pub fn enforcing_harness() -> (TestHarness, DelegationSet) {
    let delegations: DelegationSet = Arc::new(Mutex::new(HashSet::new()));
    let base =
        Arc::new(MockLedger::new("http://base.mock").tracking_delegations(delegations.clone()));
    let rollup =
        Arc::new(MockLedger::new("http://rollup.mock").enforcing_delegations(delegations.clone()));
    (build_harness(base, rollup), delegations)
}

fn build_harness(base: Arc<MockLedger>, rollup: Arc<MockLedger>) -> TestHarness {
    let validator = Pubkey::new_unique();
    let config = GameBridgeConfig::new(test_wallet(), validator);
    let bridge = GameBridge::new(config, base.clone(), rollup.clone());
    TestHarness {
        bridge,
        base,
        rollup,
        validator,
    }
}
