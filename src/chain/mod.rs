//! Target network description and contract constants.
//!
//! Everything here is fixed once loaded. The defaults describe BNB Smart
//! Chain mainnet, which is where the prediction market contract will live.

pub mod abi;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// BNB Smart Chain mainnet.
pub const BSC_CHAIN_ID: u64 = 56;

/// The prediction market contract has not been deployed yet.
pub const PREDICTION_MARKET: Option<Address> = None;

/// Native currency metadata, as a wallet would display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "BNB".to_string(),
            symbol: "BNB".to_string(),
            decimals: 18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_chain_name")]
    pub chain_name: String,
    /// RPC endpoints in preference order.
    #[serde(default = "default_rpc_urls")]
    pub rpc_urls: Vec<String>,
    #[serde(default = "default_explorer_urls")]
    pub block_explorer_urls: Vec<String>,
    #[serde(default)]
    pub native_currency: NativeCurrency,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            chain_name: default_chain_name(),
            rpc_urls: default_rpc_urls(),
            block_explorer_urls: default_explorer_urls(),
            native_currency: NativeCurrency::default(),
        }
    }
}

impl ChainConfig {
    /// Chain id as the `0x`-prefixed hex string wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// First configured RPC endpoint, if any.
    pub fn primary_rpc(&self) -> Option<&str> {
        self.rpc_urls.iter().map(String::as_str).find(|u| !u.is_empty())
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
        self.block_explorer_urls
            .first()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}

fn default_chain_id() -> u64 {
    BSC_CHAIN_ID
}

fn default_chain_name() -> String {
    "BNB Smart Chain".to_string()
}

fn default_rpc_urls() -> Vec<String> {
    vec!["https://bsc-dataseed.binance.org/".to_string()]
}

fn default_explorer_urls() -> Vec<String> {
    vec!["https://bscscan.com".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bsc() {
        let chain = ChainConfig::default();
        assert_eq!(chain.chain_id, 56);
        assert_eq!(chain.native_currency.decimals, 18);
        assert_eq!(chain.native_currency.symbol, "BNB");
        assert_eq!(chain.primary_rpc(), Some("https://bsc-dataseed.binance.org/"));
    }

    #[test]
    fn test_chain_id_hex() {
        let chain = ChainConfig::default();
        assert_eq!(chain.chain_id_hex(), "0x38");

        let other = ChainConfig { chain_id: 97, ..Default::default() };
        assert_eq!(other.chain_id_hex(), "0x61");
    }

    #[test]
    fn test_tx_url() {
        let chain = ChainConfig {
            block_explorer_urls: vec!["https://bscscan.com/".to_string()],
            ..Default::default()
        };
        assert_eq!(
            chain.tx_url("0xabc").as_deref(),
            Some("https://bscscan.com/tx/0xabc")
        );

        let bare = ChainConfig { block_explorer_urls: vec![], ..Default::default() };
        assert_eq!(bare.tx_url("0xabc"), None);
    }

    #[test]
    fn test_primary_rpc_skips_empty() {
        let chain = ChainConfig {
            rpc_urls: vec![String::new(), "https://example.org".to_string()],
            ..Default::default()
        };
        assert_eq!(chain.primary_rpc(), Some("https://example.org"));
    }
}
