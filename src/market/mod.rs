//! Market reads and odds derivation.
//!
//! Reads are sequential and all-or-nothing: one failed call fails the whole
//! fetch, and callers never see a partially populated market or list.

pub mod contract;
pub mod sample;
pub mod submit;

pub use contract::{ContractClient, ContractError, MarketContract, RawMarket};
pub use sample::{SampleMarket, Trend, SAMPLE_MARKETS};
pub use submit::Submitter;

use alloy::primitives::utils::format_units;
use alloy::primitives::U256;
use serde::Serialize;
use tracing::{debug, info};

use crate::chain::ChainConfig;
use crate::error::{Error, Result};
use crate::side::Side;
use crate::wallet::Session;

/// A prediction market as displayed. Recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    pub id: u64,
    pub question: String,
    /// Unix seconds. End times past `i64::MAX` are clamped to it.
    pub end_time: i64,
    pub total_liquidity: String,
    pub resolved: bool,
    pub outcome: bool,
    pub yes_liquidity: String,
    pub no_liquidity: String,
    pub yes_odds: f64,
    pub no_odds: f64,
}

impl Market {
    /// Combine a raw record with its pool sizes. Amounts are in base units.
    pub fn from_raw(
        id: u64,
        raw: RawMarket,
        yes: U256,
        no: U256,
        decimals: u8,
    ) -> Result<Self, ContractError> {
        let total_liquidity = format_amount(raw.total_liquidity, decimals)?;
        let yes_liquidity = format_amount(yes, decimals)?;
        let no_liquidity = format_amount(no, decimals)?;

        let (yes_odds, no_odds) = derive_odds(
            as_f64(&yes_liquidity),
            as_f64(&no_liquidity),
            as_f64(&total_liquidity),
        );

        Ok(Self {
            id,
            question: raw.question,
            end_time: clamp_end_time(raw.end_time),
            total_liquidity,
            resolved: raw.resolved,
            outcome: raw.outcome,
            yes_liquidity,
            no_liquidity,
            yes_odds,
            no_odds,
        })
    }

    pub fn odds(&self, side: Side) -> f64 {
        match side {
            Side::Yes => self.yes_odds,
            Side::No => self.no_odds,
        }
    }

    /// Pool size for one side, formatted.
    pub fn liquidity(&self, side: Side) -> &str {
        match side {
            Side::Yes => &self.yes_liquidity,
            Side::No => &self.no_liquidity,
        }
    }

    /// Past its end time. Resolution is tracked separately.
    pub fn has_ended(&self, now_secs: i64) -> bool {
        self.end_time <= now_secs
    }

    /// Winning side once resolved.
    pub fn winner(&self) -> Option<Side> {
        self.resolved.then(|| Side::from_position(self.outcome))
    }
}

/// Display odds for each side from pool sizes.
///
/// Each side's odds are the *opposing* pool's share of total liquidity, so a
/// heavier YES pool makes NO pay more. An empty market is 50/50.
pub fn derive_odds(yes: f64, no: f64, total: f64) -> (f64, f64) {
    if total > 0.0 {
        (no / total, yes / total)
    } else {
        (0.5, 0.5)
    }
}

/// Base units to a decimal string, trimmed the way wallets show it ("1.5", "100.0").
pub fn format_amount(amount: U256, decimals: u8) -> Result<String, ContractError> {
    let s = format_units(amount, decimals)?;
    if !s.contains('.') {
        return Ok(format!("{}.0", s));
    }
    let trimmed = s.trim_end_matches('0');
    Ok(if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    })
}

fn clamp_end_time(end_time: U256) -> i64 {
    u64::try_from(end_time)
        .ok()
        .and_then(|secs| i64::try_from(secs).ok())
        .unwrap_or(i64::MAX)
}

fn as_f64(s: &str) -> f64 {
    s.parse().unwrap_or(0.0)
}

/// Reads markets through a connected session.
pub struct MarketReader<'a, C> {
    session: &'a Session<C>,
    decimals: u8,
}

impl<'a, C: MarketContract> MarketReader<'a, C> {
    pub fn new(session: &'a Session<C>, chain: &ChainConfig) -> Self {
        Self {
            session,
            decimals: chain.native_currency.decimals,
        }
    }

    fn contract(&self) -> Result<&'a C> {
        self.session.contract().ok_or(Error::NotConnected)
    }

    /// Read one market and derive its odds.
    pub async fn fetch_one(&self, id: u64) -> Result<Market> {
        let contract = self.contract()?;
        read_market(contract, id, self.decimals)
            .await
            .map_err(Error::Read)
    }

    /// Read every market, in id order, one call at a time.
    pub async fn fetch_all(&self) -> Result<Vec<Market>> {
        let contract = self.contract()?;

        let count = contract.market_count().await.map_err(Error::Read)?;
        let count = u64::try_from(count)
            .map_err(|_| Error::Read(ContractError::Rpc(format!("market count {} out of range", count))))?;
        debug!(count, "reading markets");

        let mut markets = Vec::with_capacity(count.min(1024) as usize);
        for id in 0..count {
            let market = read_market(contract, id, self.decimals)
                .await
                .map_err(Error::Read)?;
            markets.push(market);
        }

        info!(count = markets.len(), "markets loaded");
        Ok(markets)
    }
}

async fn read_market<C: MarketContract>(
    contract: &C,
    id: u64,
    decimals: u8,
) -> Result<Market, ContractError> {
    let key = U256::from(id);
    let raw = contract.market(key).await?;
    let yes = contract.liquidity(key, Side::Yes).await?;
    let no = contract.liquidity(key, Side::No).await?;
    debug!(id, question = %raw.question, "market read");
    Market::from_raw(id, raw, yes, no, decimals)
}
