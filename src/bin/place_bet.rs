//! Bet on one side of a market, then print the refreshed odds.
//!
//! Usage:
//!   cargo run --bin place_bet -- <market-id> <yes|no> <amount>
//!
//! Requires `features.enable_betting = true`.

use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use nomo_rs::config::Config;
use nomo_rs::format;
use nomo_rs::logging;
use nomo_rs::market::submit::check_bet;
use nomo_rs::market::{MarketReader, Submitter};
use nomo_rs::side::Side;
use nomo_rs::wallet::SessionManager;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        bail!("usage: place_bet <market-id> <yes|no> <amount>");
    }
    let market_id: u64 = args[0]
        .parse()
        .with_context(|| format!("invalid market id: {}", args[0]))?;
    let side = Side::from_str(&args[1]).map_err(|e| anyhow!(e))?;
    let amount = args[2].as_str();

    let config = Config::load_default()?;
    logging::init(&config.general.log_level);

    // Fail on the flag or a bad amount before touching the wallet or the chain
    check_bet(
        config.features.enable_betting,
        amount,
        config.chain.native_currency.decimals,
    )?;
    let stake = Decimal::from_str(amount.trim())?;

    let mut manager = SessionManager::from_config(&config)?;
    manager.connect().await?;

    let reader = MarketReader::new(manager.session(), manager.chain());
    let market = reader.fetch_one(market_id).await?;
    let odds = market.odds(side);
    let symbol = &manager.chain().native_currency.symbol;
    println!("#{} {}", market.id, market.question);
    println!(
        "{} at {}: payout {} {}, profit {} {}",
        side,
        format::percent(odds, 1),
        format::potential_payout(stake, odds),
        symbol,
        format::potential_profit(stake, odds),
        symbol,
    );

    let submitter = Submitter::new(manager.session(), manager.chain(), manager.features());
    let tx_hash = submitter.place_bet(market_id, side, amount).await?;
    println!("Bet placed: {}", tx_hash);
    if let Some(url) = manager.chain().tx_url(&tx_hash.to_string()) {
        println!("{}", url);
    }

    // The bet already landed; a failed refresh only costs the summary.
    match reader.fetch_all().await {
        Ok(markets) => {
            if let Some(m) = markets.iter().find(|m| m.id == market_id) {
                println!(
                    "Now YES {} / NO {}",
                    format::percent(m.yes_odds, 1),
                    format::percent(m.no_odds, 1)
                );
            }
        }
        Err(e) => warn!(error = %e, "refresh after bet failed"),
    }
    Ok(())
}
