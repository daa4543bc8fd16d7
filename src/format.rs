//! Display helpers for market listings.

use alloy::primitives::Address;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Odds as a percentage, e.g. `0.4` → `"40%"` or `"40.0%"`.
pub fn percent(odds: f64, precision: usize) -> String {
    format!("{:.*}%", precision, odds * 100.0)
}

/// Gross payout for staking `amount` at `odds`: `amount / odds`, to 4 dp.
///
/// Zero for a non-positive stake or degenerate odds.
pub fn potential_payout(amount: Decimal, odds: f64) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match Decimal::from_f64(odds) {
        Some(o) if o > Decimal::ZERO => (amount / o).round_dp(4),
        _ => Decimal::ZERO,
    }
}

/// Payout minus stake.
pub fn potential_profit(amount: Decimal, odds: f64) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    potential_payout(amount, odds) - amount
}

/// Countdown to `end_secs`: `"3d 4h"`, `"4h 12m"`, `"12m"` or `"Ended"`.
pub fn time_remaining(end_secs: i64, now: DateTime<Utc>) -> String {
    let diff = end_secs.saturating_sub(now.timestamp());
    if diff <= 0 {
        return "Ended".to_string();
    }

    let days = diff / 86_400;
    let hours = (diff % 86_400) / 3_600;
    let minutes = (diff % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// `"Dec 31, 2030"`. Out-of-range timestamps render as `"-"`.
pub fn end_date(end_secs: i64) -> String {
    match Utc.timestamp_opt(end_secs, 0).single() {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "-".to_string(),
    }
}

/// `"$2.4M"`, `"$350K"`, `"$999"`.
pub fn volume(usd: f64) -> String {
    if usd >= 1_000_000.0 {
        format!("${:.1}M", usd / 1_000_000.0)
    } else if usd >= 1_000.0 {
        format!("${:.0}K", usd / 1_000.0)
    } else {
        format!("${}", usd)
    }
}

/// `"0xAb...cdEf"` for compact account display.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..4], &full[full.len() - 4..])
}
