use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use nomo_rs::config::Config;
use nomo_rs::format;
use nomo_rs::logging;
use nomo_rs::market::{Market, MarketReader, Trend, SAMPLE_MARKETS};
use nomo_rs::prefs::{t, Language, PreferenceStore};
use nomo_rs::side::Side;
use nomo_rs::wallet::SessionManager;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load_default()?;
    logging::init(&config.general.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");

    let mut prefs = PreferenceStore::open(&config.preferences.path);
    if let Some(code) = flag_value(&args, "--lang") {
        match Language::from_code(code) {
            Some(lang) => prefs.set_language(lang)?,
            None => warn!(code, "unknown language, keeping {}", prefs.language()),
        }
    }
    let lang = prefs.language();

    let mut manager = SessionManager::from_config(&config)?;
    let markets = match manager.connect().await {
        Ok(address) => {
            if !json {
                println!("{} {}", t(lang, "wallet.connected"), format::short_address(&address));
            }
            let reader = MarketReader::new(manager.session(), manager.chain());
            match reader.fetch_all().await {
                Ok(markets) => Some(markets),
                Err(e) => {
                    warn!(error = %e, "could not load markets");
                    None
                }
            }
        }
        Err(e) => {
            info!(error = %e, "not connected");
            None
        }
    };

    match markets {
        Some(markets) if json => println!("{}", serde_json::to_string_pretty(&markets)?),
        Some(markets) => print_markets(&markets, lang),
        None if json => println!("[]"),
        None => print_samples(lang),
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn print_markets(markets: &[Market], lang: Language) {
    println!("\n{}\n", t(lang, "markets.title"));
    if markets.is_empty() {
        println!("  {}", t(lang, "markets.empty"));
        return;
    }

    let now = Utc::now();
    for m in markets {
        println!("#{} {}", m.id, m.question);
        println!(
            "    {} {} ({})  {} {} ({})  {} {}",
            t(lang, "predictions.yes"),
            format::percent(m.yes_odds, 0),
            m.liquidity(Side::Yes),
            t(lang, "predictions.no"),
            format::percent(m.no_odds, 0),
            m.liquidity(Side::No),
            t(lang, "markets.liquidity"),
            m.total_liquidity,
        );
        if let Some(winner) = m.winner() {
            let outcome = match winner {
                Side::Yes => "predictions.yes",
                Side::No => "predictions.no",
            };
            println!("    {}: {}", t(lang, "markets.resolved"), t(lang, outcome));
        } else if m.has_ended(now.timestamp()) {
            println!("    {}", t(lang, "markets.awaiting"));
        } else {
            println!(
                "    {} {} ({})",
                t(lang, "markets.ends"),
                format::end_date(m.end_time),
                format::time_remaining(m.end_time, now),
            );
        }
    }
}

fn print_samples(lang: Language) {
    println!("\n{}\n", t(lang, "markets.sample"));
    let now = Utc::now();
    for m in SAMPLE_MARKETS.iter() {
        let arrow = match m.trend {
            Trend::Up => "↑",
            Trend::Down => "↓",
        };
        println!("#{} [{}] {} {}", m.id, m.category, m.title, arrow);
        println!(
            "    {} {}  {} {}  {} {}  {} {}  {} {}",
            t(lang, "predictions.yes"),
            format::percent(m.yes_odds, 0),
            t(lang, "predictions.no"),
            format::percent(m.no_odds, 0),
            t(lang, "predictions.volume"),
            format::volume(m.volume),
            t(lang, "predictions.users"),
            m.participants,
            t(lang, "markets.ends"),
            format::time_remaining(m.end_time, now),
        );
    }
}
