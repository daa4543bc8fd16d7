//! Boundary to the on-chain prediction market contract.

use alloy::network::{Ethereum, ReceiptResponse};
use alloy::primitives::utils::UnitsError;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, PendingTransactionError};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::chain::abi::IPredictionMarket::{self, IPredictionMarketInstance};
use crate::side::Side;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("prediction market contract address is not configured")]
    NotDeployed,
    #[error(transparent)]
    Call(#[from] alloy::contract::Error),
    #[error(transparent)]
    Confirmation(#[from] PendingTransactionError),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error(transparent)]
    Units(#[from] UnitsError),
    #[error("{0}")]
    Rpc(String),
}

/// Raw `markets(id)` record, before liquidity lookups and formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMarket {
    pub question: String,
    pub end_time: U256,
    pub total_liquidity: U256,
    pub resolved: bool,
    pub outcome: bool,
}

/// Reads and writes against the market contract, bound to one account.
///
/// Write methods return only after the transaction is confirmed.
#[async_trait]
pub trait MarketContract: Send + Sync {
    async fn market_count(&self) -> Result<U256, ContractError>;

    async fn market(&self, id: U256) -> Result<RawMarket, ContractError>;

    /// Liquidity held in one side's pool, in base units.
    async fn liquidity(&self, id: U256, side: Side) -> Result<U256, ContractError>;

    async fn create_market(&self, question: String, end_time: U256)
        -> Result<TxHash, ContractError>;

    /// Adds `value` base units to one side's pool.
    async fn add_liquidity(&self, id: U256, side: Side, value: U256)
        -> Result<TxHash, ContractError>;

    async fn claim_winnings(&self, id: U256) -> Result<TxHash, ContractError>;
}

/// Alloy-backed contract handle.
///
/// Without an address every call fails with `NotDeployed`.
pub struct ContractClient {
    instance: Option<IPredictionMarketInstance<DynProvider>>,
    account: Address,
}

impl ContractClient {
    pub fn new(provider: DynProvider, address: Option<Address>, account: Address) -> Self {
        Self {
            instance: address.map(|addr| IPredictionMarket::new(addr, provider)),
            account,
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn address(&self) -> Option<Address> {
        self.instance.as_ref().map(|i| *i.address())
    }

    fn instance(&self) -> Result<&IPredictionMarketInstance<DynProvider>, ContractError> {
        self.instance.as_ref().ok_or(ContractError::NotDeployed)
    }
}

/// Wait for the receipt and reject reverted transactions.
async fn confirm(pending: PendingTransactionBuilder<Ethereum>) -> Result<TxHash, ContractError> {
    let tx_hash = *pending.tx_hash();
    debug!(%tx_hash, "transaction sent, awaiting receipt");

    let receipt = pending.get_receipt().await?;
    check_receipt(&receipt)
}

fn check_receipt<R: ReceiptResponse>(receipt: &R) -> Result<TxHash, ContractError> {
    let tx_hash = receipt.transaction_hash();
    if !receipt.status() {
        return Err(ContractError::Reverted(tx_hash));
    }

    info!(%tx_hash, block = ?receipt.block_number(), "transaction confirmed");
    Ok(tx_hash)
}

#[async_trait]
impl MarketContract for ContractClient {
    async fn market_count(&self) -> Result<U256, ContractError> {
        Ok(self.instance()?.marketCount().call().await?)
    }

    async fn market(&self, id: U256) -> Result<RawMarket, ContractError> {
        let m = self.instance()?.markets(id).call().await?;
        Ok(RawMarket {
            question: m.question,
            end_time: m.endTime,
            total_liquidity: m.totalLiquidity,
            resolved: m.resolved,
            outcome: m.outcome,
        })
    }

    async fn liquidity(&self, id: U256, side: Side) -> Result<U256, ContractError> {
        Ok(self
            .instance()?
            .getLiquidity(id, side.as_position())
            .call()
            .await?)
    }

    async fn create_market(
        &self,
        question: String,
        end_time: U256,
    ) -> Result<TxHash, ContractError> {
        let pending = self
            .instance()?
            .createMarket(question, end_time)
            .from(self.account)
            .send()
            .await?;
        confirm(pending).await
    }

    async fn add_liquidity(
        &self,
        id: U256,
        side: Side,
        value: U256,
    ) -> Result<TxHash, ContractError> {
        let pending = self
            .instance()?
            .addLiquidity(id, side.as_position())
            .from(self.account)
            .value(value)
            .send()
            .await?;
        confirm(pending).await
    }

    async fn claim_winnings(&self, id: U256) -> Result<TxHash, ContractError> {
        let pending = self
            .instance()?
            .claimWinnings(id)
            .from(self.account)
            .send()
            .await?;
        confirm(pending).await
    }
}
