//! JSON-RPC wallet provider.
//!
//! Two flavours share one type:
//! - external: a wallet exposing an EIP-1193 JSON-RPC endpoint. It owns the
//!   keys, prompts the user, and signs `eth_sendTransaction`.
//! - local: a private key from the environment signing against the chain's
//!   public RPC. It always has exactly one account and cannot switch chains.

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{Capability, ProviderError, SessionManager, WalletProvider};
use crate::chain::{ChainConfig, NativeCurrency};
use crate::config::{Config, ConfigError};
use crate::market::contract::ContractClient;

/// EIP-1193 "chain not added to wallet".
const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    External,
    Local(Address),
}

pub struct RpcWallet {
    provider: DynProvider,
    mode: Mode,
    contract: Option<Address>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams {
    chain_id: String,
}

/// EIP-3085 `wallet_addEthereumChain` parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddChainParams {
    chain_id: String,
    chain_name: String,
    rpc_urls: Vec<String>,
    block_explorer_urls: Vec<String>,
    native_currency: NativeCurrency,
}

impl AddChainParams {
    fn new(chain: &ChainConfig) -> Self {
        Self {
            chain_id: chain.chain_id_hex(),
            chain_name: chain.chain_name.clone(),
            rpc_urls: chain.rpc_urls.clone(),
            block_explorer_urls: chain.block_explorer_urls.clone(),
            native_currency: chain.native_currency.clone(),
        }
    }
}

impl RpcWallet {
    /// Wallet reached through its own JSON-RPC endpoint.
    pub fn external(endpoint: &str, contract: Option<Address>) -> Result<Self, ConfigError> {
        let url = endpoint
            .parse()
            .map_err(|_| ConfigError::InvalidUrl(endpoint.to_string()))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self {
            provider,
            mode: Mode::External,
            contract,
        })
    }

    /// Locally held key signing against `rpc_url`.
    pub fn local(key: &str, rpc_url: &str, contract: Option<Address>) -> Result<Self, ConfigError> {
        let signer: PrivateKeySigner = key.parse().map_err(|_| ConfigError::InvalidKey)?;
        let address = signer.address();
        let url = rpc_url
            .parse()
            .map_err(|_| ConfigError::InvalidUrl(rpc_url.to_string()))?;
        let provider = ProviderBuilder::new().wallet(signer).connect_http(url).erased();
        Ok(Self {
            provider,
            mode: Mode::Local(address),
            contract,
        })
    }

    pub fn is_local(&self) -> bool {
        matches!(self.mode, Mode::Local(_))
    }

    async fn add_chain(&self, chain: &ChainConfig) -> Result<(), ProviderError> {
        info!(chain_id = chain.chain_id, name = %chain.chain_name, "adding chain to wallet");
        self.provider
            .raw_request::<_, serde_json::Value>(
                "wallet_addEthereumChain".into(),
                [AddChainParams::new(chain)],
            )
            .await?;
        Ok(())
    }
}

/// Look for a usable wallet. The environment key wins over a configured endpoint.
pub fn detect(config: &Config) -> Result<Capability<RpcWallet>, ConfigError> {
    let contract = config.contract_address()?;

    if let Some(key) = config.wallet.private_key.as_deref() {
        let rpc = config
            .chain
            .primary_rpc()
            .ok_or(ConfigError::NoRpcUrl(config.chain.chain_id))?;
        let wallet = RpcWallet::local(key, rpc, contract)?;
        debug!(rpc, "using local signing key");
        return Ok(Capability::Available(wallet));
    }

    match config.wallet.endpoint.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => {
            let wallet = RpcWallet::external(endpoint, contract)?;
            debug!(endpoint, "using external wallet endpoint");
            Ok(Capability::Available(wallet))
        }
        _ => Ok(Capability::Unavailable),
    }
}

impl SessionManager<RpcWallet> {
    /// Detect a wallet from `config` and build a disconnected manager for it.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let wallet = detect(config)?;
        Ok(SessionManager::new(
            wallet,
            config.chain.clone(),
            config.features.clone(),
        ))
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    type Contract = ContractClient;

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        match self.mode {
            Mode::Local(address) => Ok(vec![address]),
            Mode::External => Ok(self
                .provider
                .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), ())
                .await?),
        }
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn switch_chain(&self, chain: &ChainConfig) -> Result<(), ProviderError> {
        if self.is_local() {
            return Err(ProviderError::SwitchUnsupported);
        }

        let params = [SwitchChainParams {
            chain_id: chain.chain_id_hex(),
        }];
        let result = self
            .provider
            .raw_request::<_, serde_json::Value>("wallet_switchEthereumChain".into(), params)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.as_error_resp().is_some_and(|r| r.code == UNRECOGNIZED_CHAIN) => {
                warn!(chain_id = chain.chain_id, "wallet does not know the chain");
                self.add_chain(chain).await
            }
            Err(e) => Err(e.into()),
        }
    }

    fn bind(&self, account: Address) -> ContractClient {
        ContractClient::new(self.provider.clone(), self.contract, account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    // Well-known development key.
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn test_switch_params_shape() {
        let params = [SwitchChainParams {
            chain_id: ChainConfig::default().chain_id_hex(),
        }];
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json, serde_json::json!([{ "chainId": "0x38" }]));
    }

    #[test]
    fn test_add_chain_params_shape() {
        let json = serde_json::to_value(AddChainParams::new(&ChainConfig::default())).unwrap();
        assert_eq!(json["chainId"], "0x38");
        assert_eq!(json["chainName"], "BNB Smart Chain");
        assert_eq!(json["rpcUrls"][0], "https://bsc-dataseed.binance.org/");
        assert_eq!(json["blockExplorerUrls"][0], "https://bscscan.com");
        assert_eq!(json["nativeCurrency"]["symbol"], "BNB");
        assert_eq!(json["nativeCurrency"]["decimals"], 18);
    }

    #[tokio::test]
    async fn test_detect_nothing_configured() {
        let config = Config::default();
        assert!(matches!(detect(&config).unwrap(), Capability::Unavailable));
    }

    #[tokio::test]
    async fn test_detect_blank_endpoint_is_unavailable() {
        let mut config = Config::default();
        config.wallet.endpoint = Some("   ".to_string());
        assert!(matches!(detect(&config).unwrap(), Capability::Unavailable));
    }

    #[tokio::test]
    async fn test_detect_external() {
        let mut config = Config::default();
        config.wallet.endpoint = Some("http://127.0.0.1:1248".to_string());

        match detect(&config).unwrap() {
            Capability::Available(wallet) => assert!(!wallet.is_local()),
            Capability::Unavailable => panic!("expected a wallet"),
        }
    }

    #[tokio::test]
    async fn test_detect_prefers_local_key() {
        let mut config = Config::default();
        config.wallet.endpoint = Some("http://127.0.0.1:1248".to_string());
        config.wallet.private_key = Some(DEV_KEY.to_string());

        let Capability::Available(wallet) = detect(&config).unwrap() else {
            panic!("expected a wallet");
        };
        assert!(wallet.is_local());

        // Local accounts never touch the network
        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![DEV_ADDRESS]);

        let err = wallet.switch_chain(&ChainConfig::default()).await.unwrap_err();
        assert!(matches!(err, ProviderError::SwitchUnsupported));
    }

    #[tokio::test]
    async fn test_detect_bad_key() {
        let mut config = Config::default();
        config.wallet.private_key = Some("not-a-key".to_string());
        assert!(matches!(detect(&config), Err(ConfigError::InvalidKey)));
    }

    #[tokio::test]
    async fn test_detect_bad_endpoint() {
        let mut config = Config::default();
        config.wallet.endpoint = Some("not a url".to_string());
        assert!(matches!(detect(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_bind_without_contract() {
        let wallet = RpcWallet::local(DEV_KEY, "http://127.0.0.1:8545", None).unwrap();
        let client = wallet.bind(DEV_ADDRESS);
        assert_eq!(client.account(), DEV_ADDRESS);
        assert_eq!(client.address(), None);
    }
}
