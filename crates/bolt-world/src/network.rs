//! Network environments
//!
//! Each named environment carries a base-layer endpoint, a rollup endpoint and
//! the rollup validator that delegated accounts commit through.

use std::fmt;
use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Local rollup validator identity
pub const LOCAL_VALIDATOR: Pubkey =
    solana_sdk::pubkey!("mAGicPQYBMvcYveUZA5F5UNNwyHvfYh5xkLS2Fr1mev");
/// Devnet rollup validator identity (shared by the Asia and Global clusters)
pub const DEVNET_VALIDATOR: Pubkey =
    solana_sdk::pubkey!("MAS1Dt9qreoRMQ14YQuhg8UTZMMzDdKhmkZMECCzk57");

/// One RPC endpoint pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// HTTP JSON-RPC URL
    pub rpc_url: String,
    /// WebSocket URL (account subscriptions)
    pub ws_url: String,
}

impl EndpointConfig {
    fn new(rpc_url: &str, ws_url: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            ws_url: ws_url.to_string(),
        }
    }
}

/// Named deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkEnv {
    /// Local test validator + local rollup
    #[default]
    Local,
    /// Devnet base layer + Asia rollup cluster
    DevnetAsia,
    /// Devnet base layer + global rollup cluster
    DevnetGlobal,
}

impl NetworkEnv {
    /// Base layer endpoint (authoritative, fee-paying)
    pub fn base(&self) -> EndpointConfig {
        match self {
            NetworkEnv::Local => EndpointConfig::new("http://127.0.0.1:8899", "ws://127.0.0.1:8900"),
            NetworkEnv::DevnetAsia | NetworkEnv::DevnetGlobal => EndpointConfig::new(
                "https://api.devnet.solana.com",
                "wss://api.devnet.solana.com",
            ),
        }
    }

    /// Rollup endpoint (fast, fee-less once delegated)
    pub fn rollup(&self) -> EndpointConfig {
        match self {
            NetworkEnv::Local => EndpointConfig::new("http://127.0.0.1:7799", "ws://127.0.0.1:7800"),
            NetworkEnv::DevnetAsia => EndpointConfig::new(
                "https://devnet-as.magicblock.app",
                "wss://devnet.magicblock.app",
            ),
            NetworkEnv::DevnetGlobal => EndpointConfig::new(
                "https://devnet.magicblock.app",
                "wss://devnet.magicblock.app",
            ),
        }
    }

    /// Validator components are delegated to in this environment
    pub fn validator(&self) -> Pubkey {
        match self {
            NetworkEnv::Local => LOCAL_VALIDATOR,
            NetworkEnv::DevnetAsia | NetworkEnv::DevnetGlobal => DEVNET_VALIDATOR,
        }
    }
}

impl fmt::Display for NetworkEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkEnv::Local => "local",
            NetworkEnv::DevnetAsia => "devnet-asia",
            NetworkEnv::DevnetGlobal => "devnet-global",
        };
        f.write_str(name)
    }
}

/// Unknown environment name
#[derive(Error, Debug, Clone)]
#[error("unknown network environment: {0} (expected local, devnet-asia or devnet-global)")]
pub struct ParseEnvError(String);

impl FromStr for NetworkEnv {
    type Err = ParseEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(NetworkEnv::Local),
            "devnet-asia" => Ok(NetworkEnv::DevnetAsia),
            "devnet-global" => Ok(NetworkEnv::DevnetGlobal),
            other => Err(ParseEnvError(other.to_string())),
        }
    }
}
