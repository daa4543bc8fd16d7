//! Wallet session acquisition.
//!
//! A `SessionManager` owns the single `Session` for the process. It only
//! connects when asked to. Failed attempts leave the session disconnected
//! with the error recorded, and the caller decides whether to try again.

pub mod rpc;

pub use rpc::RpcWallet;

use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chain::ChainConfig;
use crate::config::Features;
use crate::error::{Error, Result};
use crate::market::contract::MarketContract;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Transport(#[from] alloy::transports::TransportError),
    #[error("this wallet cannot switch networks")]
    SwitchUnsupported,
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// The EIP-1193 request surface the session needs from a wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    type Contract: MarketContract;

    /// `eth_requestAccounts`. May prompt the user.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// `eth_chainId`.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// `wallet_switchEthereumChain`.
    async fn switch_chain(&self, chain: &ChainConfig) -> Result<(), ProviderError>;

    /// Contract handle that signs as `account`.
    fn bind(&self, account: Address) -> Self::Contract;
}

/// Result of probing for a wallet.
pub enum Capability<W> {
    Available(W),
    Unavailable,
}

/// Authorized account plus the contract handle bound to it.
pub struct Account<C> {
    pub address: Address,
    pub contract: C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Whether, and as whom, we can read and write on-chain state.
pub struct Session<C> {
    account: Option<Account<C>>,
    loading: bool,
    last_error: Option<String>,
}

impl<C> Default for Session<C> {
    fn default() -> Self {
        Self {
            account: None,
            loading: false,
            last_error: None,
        }
    }
}

impl<C> Session<C> {
    pub fn address(&self) -> Option<Address> {
        self.account.as_ref().map(|a| a.address)
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `Connecting` only holds while `connect` runs. That call borrows the
    /// manager mutably, so other code sees `Disconnected` or `Connected`.
    pub fn state(&self) -> SessionState {
        if self.account.is_some() {
            SessionState::Connected
        } else if self.loading {
            SessionState::Connecting
        } else {
            SessionState::Disconnected
        }
    }

    /// Bound contract handle, if connected.
    pub fn contract(&self) -> Option<&C> {
        self.account.as_ref().map(|a| &a.contract)
    }
}

pub struct SessionManager<W: WalletProvider> {
    wallet: Capability<W>,
    chain: ChainConfig,
    features: Features,
    session: Session<W::Contract>,
}

impl<W: WalletProvider> SessionManager<W> {
    pub fn new(wallet: Capability<W>, chain: ChainConfig, features: Features) -> Self {
        Self {
            wallet,
            chain,
            features,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session<W::Contract> {
        &self.session
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Connect the wallet and bind the contract to its first account.
    ///
    /// Exclusive access means attempts never overlap. Calling this on a
    /// connected session returns the current address without prompting.
    pub async fn connect(&mut self) -> Result<Address> {
        if let Some(address) = self.session.address() {
            debug!(%address, "already connected");
            return Ok(address);
        }

        self.session.loading = true;
        self.session.last_error = None;

        let result = self.handshake().await;
        self.session.loading = false;

        match result {
            Ok(account) => {
                let address = account.address;
                info!(%address, chain_id = self.chain.chain_id, "wallet connected");
                self.session.account = Some(account);
                Ok(address)
            }
            Err(e) => {
                warn!(error = %e, "wallet connection failed");
                self.session.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn handshake(&self) -> Result<Account<W::Contract>> {
        if !self.features.enable_wallet_connection {
            return Err(Error::FeatureDisabled("wallet connection"));
        }

        let wallet = match &self.wallet {
            Capability::Available(w) => w,
            Capability::Unavailable => return Err(Error::ProviderUnavailable),
        };

        let accounts = wallet.request_accounts().await.map_err(Error::Wallet)?;
        let address = *accounts.first().ok_or(Error::NoAccounts)?;

        let actual = wallet.chain_id().await.map_err(Error::Wallet)?;
        if actual != self.chain.chain_id {
            info!(
                actual,
                expected = self.chain.chain_id,
                "wallet on wrong network, requesting switch"
            );
            wallet
                .switch_chain(&self.chain)
                .await
                .map_err(|source| Error::WrongNetwork {
                    expected: self.chain.chain_id,
                    actual,
                    source,
                })?;
        }

        Ok(Account {
            address,
            contract: wallet.bind(address),
        })
    }
}
