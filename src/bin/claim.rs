//! Claim winnings from a resolved market.
//!
//! Usage:
//!   cargo run --bin claim -- <market-id>

use anyhow::{bail, Context, Result};

use nomo_rs::config::Config;
use nomo_rs::logging;
use nomo_rs::market::Submitter;
use nomo_rs::wallet::SessionManager;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(raw_id) = args.first() else {
        bail!("usage: claim <market-id>");
    };
    let market_id: u64 = raw_id
        .parse()
        .with_context(|| format!("invalid market id: {}", raw_id))?;

    let config = Config::load_default()?;
    logging::init(&config.general.log_level);

    let mut manager = SessionManager::from_config(&config)?;
    manager.connect().await?;

    let submitter = Submitter::new(manager.session(), manager.chain(), manager.features());
    let tx_hash = submitter.claim_winnings(market_id).await?;

    println!("Winnings claimed: {}", tx_hash);
    if let Some(url) = manager.chain().tx_url(&tx_hash.to_string()) {
        println!("{}", url);
    }
    Ok(())
}
