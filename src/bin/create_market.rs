//! Open a new prediction market.
//!
//! Usage:
//!   cargo run --bin create_market -- <end-unix-secs> <question...>

use anyhow::{bail, Context, Result};

use nomo_rs::config::Config;
use nomo_rs::logging;
use nomo_rs::market::Submitter;
use nomo_rs::wallet::SessionManager;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: create_market <end-unix-secs> <question...>");
    }
    let end_time: u64 = args[0]
        .parse()
        .with_context(|| format!("invalid end time: {}", args[0]))?;
    let question = args[1..].join(" ");
    if question.trim().is_empty() {
        bail!("question must not be empty");
    }

    let config = Config::load_default()?;
    logging::init(&config.general.log_level);

    let mut manager = SessionManager::from_config(&config)?;
    let address = manager.connect().await?;
    println!("Connected as {}", address);

    let submitter = Submitter::new(manager.session(), manager.chain(), manager.features());
    let tx_hash = submitter.create_market(&question, end_time).await?;

    println!("Market created: {}", tx_hash);
    if let Some(url) = manager.chain().tx_url(&tx_hash.to_string()) {
        println!("{}", url);
    }
    Ok(())
}
