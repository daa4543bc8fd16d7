//! State-changing contract calls.
//!
//! Every call needs a connected session, may prompt the user to sign, and
//! returns only once the transaction is confirmed. Nothing is retried.

use alloy::primitives::utils::parse_units;
use alloy::primitives::{TxHash, U256};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, warn};

use super::contract::MarketContract;
use crate::chain::ChainConfig;
use crate::config::Features;
use crate::error::{Error, Result};
use crate::side::Side;
use crate::wallet::Session;

pub struct Submitter<'a, C> {
    session: &'a Session<C>,
    decimals: u8,
    betting_enabled: bool,
}

impl<'a, C: MarketContract> Submitter<'a, C> {
    pub fn new(session: &'a Session<C>, chain: &ChainConfig, features: &Features) -> Self {
        Self {
            session,
            decimals: chain.native_currency.decimals,
            betting_enabled: features.enable_betting,
        }
    }

    fn contract(&self) -> Result<&'a C> {
        self.session.contract().ok_or(Error::NotConnected)
    }

    /// Open a new market that closes at `end_time` (unix seconds).
    pub async fn create_market(&self, question: &str, end_time: u64) -> Result<TxHash> {
        let contract = self.contract()?;
        info!(question, end_time, "creating market");

        let tx_hash = contract
            .create_market(question.to_string(), U256::from(end_time))
            .await
            .map_err(|e| {
                warn!(error = %e, "createMarket failed");
                Error::Submission(e)
            })?;

        info!(%tx_hash, "market created");
        Ok(tx_hash)
    }

    /// Bet `amount` (human units, e.g. "0.05") on one side of a market.
    pub async fn place_bet(&self, market_id: u64, side: Side, amount: &str) -> Result<TxHash> {
        let contract = self.contract()?;
        let value = check_bet(self.betting_enabled, amount, self.decimals)?;
        info!(market_id, %side, amount, %value, "placing bet");

        let tx_hash = contract
            .add_liquidity(U256::from(market_id), side, value)
            .await
            .map_err(|e| {
                warn!(market_id, error = %e, "addLiquidity failed");
                Error::Submission(e)
            })?;

        info!(market_id, %tx_hash, "bet confirmed");
        Ok(tx_hash)
    }

    pub async fn claim_winnings(&self, market_id: u64) -> Result<TxHash> {
        let contract = self.contract()?;
        info!(market_id, "claiming winnings");

        let tx_hash = contract
            .claim_winnings(U256::from(market_id))
            .await
            .map_err(|e| {
                warn!(market_id, error = %e, "claimWinnings failed");
                Error::Submission(e)
            })?;

        info!(market_id, %tx_hash, "winnings claimed");
        Ok(tx_hash)
    }
}

/// Betting flag and amount checks, in the order `place_bet` applies them.
/// Returns the stake in base units.
pub fn check_bet(betting_enabled: bool, amount: &str, decimals: u8) -> Result<U256> {
    if !betting_enabled {
        return Err(Error::FeatureDisabled("betting"));
    }
    parse_amount(amount, decimals)
}

/// Convert a human amount to base units. Must be a positive decimal.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256> {
    let trimmed = amount.trim();
    let parsed = Decimal::from_str(trimmed).map_err(|_| Error::InvalidAmount(amount.to_string()))?;
    if parsed <= Decimal::ZERO {
        return Err(Error::InvalidAmount(amount.to_string()));
    }

    let value = parse_units(trimmed, decimals)
        .map_err(|e| Error::InvalidAmount(format!("{}: {}", amount, e)))?
        .get_absolute();
    if value.is_zero() {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    Ok(value)
}
