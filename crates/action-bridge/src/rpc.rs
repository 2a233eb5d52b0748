//! Ledger RPC transport
//!
//! Client side of the Solana JSON-RPC surface the bridge needs: transaction
//! submission, blockhash and signature status queries, and account reads.
//! The trait seam lets tests run against an in-memory ledger.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::Deserialize;
use serde_json::json;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use std::str::FromStr;

use crate::error::{BridgeError, Result};

/// Snapshot of an on-chain account
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
    pub executable: bool,
}

/// Processing status of a submitted transaction
#[derive(Debug, Clone)]
pub struct TxStatus {
    /// Slot the transaction was processed in
    pub slot: u64,
    /// Error string if the ledger rejected the transaction
    pub err: Option<String>,
    /// Whether the transaction reached confirmed/finalized commitment
    pub confirmed: bool,
}

/// Ledger endpoint the bridge can submit to and read from
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Endpoint URL (logging/diagnostics)
    fn url(&self) -> &str;

    /// Submit a signed transaction, returning its signature
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature>;

    /// Fetch a recent blockhash for transaction signing
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Processing status of a signature, `None` while still unknown
    async fn signature_status(&self, signature: &Signature) -> Result<Option<TxStatus>>;

    /// Fetch account contents, `None` if the account does not exist
    async fn account_info(&self, pubkey: &Pubkey) -> Result<Option<AccountSnapshot>>;

    /// Endpoint liveness check
    async fn health(&self) -> Result<()>;
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    #[allow(dead_code)]
    context: EnvelopeContext,
    value: T,
}

#[derive(Debug, Deserialize)]
struct EnvelopeContext {
    #[allow(dead_code)]
    slot: u64,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
    #[serde(rename = "lastValidBlockHeight")]
    #[allow(dead_code)]
    last_valid_block_height: u64,
}

#[derive(Debug, Deserialize)]
struct AccountValue {
    data: (String, String),
    executable: bool,
    lamports: u64,
    owner: String,
}

#[derive(Debug, Deserialize)]
struct SignatureStatusValue {
    slot: u64,
    err: Option<serde_json::Value>,
    #[serde(rename = "confirmationStatus")]
    confirmation_status: Option<String>,
}

// ============ HTTP implementation ============

/// JSON-RPC client over HTTP
pub struct HttpLedgerRpc {
    url: String,
    client: HttpClient,
}

impl HttpLedgerRpc {
    pub fn new(url: &str) -> Result<Self> {
        let client = HttpClientBuilder::default()
            .build(url)
            .map_err(|e| BridgeError::Config(format!("invalid rpc url {url}: {e}")))?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    fn transport(e: impl std::fmt::Display) -> BridgeError {
        BridgeError::Transport(e.to_string())
    }
}

#[async_trait]
impl LedgerRpc for HttpLedgerRpc {
    fn url(&self) -> &str {
        &self.url
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature> {
        let bytes = bincode::serialize(tx)
            .map_err(|e| BridgeError::Deserialize(format!("transaction encode: {e}")))?;
        let encoded = BASE64.encode(bytes);

        let signature: String = self
            .client
            .request(
                "sendTransaction",
                rpc_params![encoded, json!({ "encoding": "base64" })],
            )
            .await
            .map_err(Self::transport)?;

        Signature::from_str(&signature)
            .map_err(|e| BridgeError::Deserialize(format!("signature: {e}")))
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        let response: RpcEnvelope<BlockhashValue> = self
            .client
            .request("getLatestBlockhash", rpc_params![])
            .await
            .map_err(Self::transport)?;

        Hash::from_str(&response.value.blockhash)
            .map_err(|e| BridgeError::Deserialize(format!("blockhash: {e}")))
    }

    async fn signature_status(&self, signature: &Signature) -> Result<Option<TxStatus>> {
        let response: RpcEnvelope<Vec<Option<SignatureStatusValue>>> = self
            .client
            .request(
                "getSignatureStatuses",
                rpc_params![vec![signature.to_string()]],
            )
            .await
            .map_err(Self::transport)?;

        let status = response.value.into_iter().next().flatten().map(|s| TxStatus {
            slot: s.slot,
            err: s.err.map(|e| e.to_string()),
            confirmed: matches!(
                s.confirmation_status.as_deref(),
                Some("confirmed") | Some("finalized")
            ),
        });
        Ok(status)
    }

    async fn account_info(&self, pubkey: &Pubkey) -> Result<Option<AccountSnapshot>> {
        let response: RpcEnvelope<Option<AccountValue>> = self
            .client
            .request(
                "getAccountInfo",
                rpc_params![pubkey.to_string(), json!({ "encoding": "base64" })],
            )
            .await
            .map_err(Self::transport)?;

        let Some(account) = response.value else {
            return Ok(None);
        };

        let (blob, encoding) = account.data;
        let data = match encoding.as_str() {
            "base58" => bs58::decode(&blob)
                .into_vec()
                .map_err(|e| BridgeError::Deserialize(format!("account data: {e}")))?,
            _ => BASE64
                .decode(&blob)
                .map_err(|e| BridgeError::Deserialize(format!("account data: {e}")))?,
        };

        let owner = Pubkey::from_str(&account.owner)
            .map_err(|e| BridgeError::Deserialize(format!("account owner: {e}")))?;

        Ok(Some(AccountSnapshot {
            lamports: account.lamports,
            owner,
            data,
            executable: account.executable,
        }))
    }

    async fn health(&self) -> Result<()> {
        let status: String = self
            .client
            .request("getHealth", rpc_params![])
            .await
            .map_err(Self::transport)?;
        if status == "ok" {
            Ok(())
        } else {
            Err(BridgeError::Transport(format!("unhealthy endpoint: {status}")))
        }
    }
}
