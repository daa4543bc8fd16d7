//! Placeholder listings shown while no wallet is connected, or when the chain
//! read fails. These are never mixed with on-chain markets.

use crate::side::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleMarket {
    pub id: u64,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub yes_odds: f64,
    pub no_odds: f64,
    /// USD.
    pub volume: f64,
    pub participants: u32,
    /// Unix seconds.
    pub end_time: i64,
    pub trend: Trend,
}

impl SampleMarket {
    pub fn odds(&self, side: Side) -> f64 {
        match side {
            Side::Yes => self.yes_odds,
            Side::No => self.no_odds,
        }
    }
}

pub const SAMPLE_MARKETS: [SampleMarket; 6] = [
    SampleMarket {
        id: 1,
        title: "Will AI achieve AGI by 2030?",
        description: "Artificial General Intelligence surpassing human cognitive abilities",
        category: "AI & Technology",
        yes_odds: 0.35,
        no_odds: 0.65,
        volume: 2_400_000.0,
        participants: 1847,
        end_time: 1_924_991_999,
        trend: Trend::Up,
    },
    SampleMarket {
        id: 2,
        title: "Will quantum computing break RSA encryption by 2028?",
        description: "Quantum computers capable of breaking current cryptographic standards",
        category: "Cybersecurity",
        yes_odds: 0.28,
        no_odds: 0.72,
        volume: 1_800_000.0,
        participants: 1203,
        end_time: 1_861_919_999,
        trend: Trend::Down,
    },
    SampleMarket {
        id: 3,
        title: "Will brain-computer interfaces reach consumer market by 2027?",
        description: "Neuralink or similar BCI technology available to general public",
        category: "Biotech",
        yes_odds: 0.42,
        no_odds: 0.58,
        volume: 3_100_000.0,
        participants: 2156,
        end_time: 1_830_297_599,
        trend: Trend::Up,
    },
    SampleMarket {
        id: 4,
        title: "Will fusion energy achieve net positive by 2035?",
        description: "Commercial fusion reactors producing more energy than consumed",
        category: "Energy",
        yes_odds: 0.31,
        no_odds: 0.69,
        volume: 1_900_000.0,
        participants: 1456,
        end_time: 2_082_758_399,
        trend: Trend::Up,
    },
    SampleMarket {
        id: 5,
        title: "Will autonomous vehicles dominate roads by 2032?",
        description: "Over 50% of vehicles on major highways are fully autonomous",
        category: "Transportation",
        yes_odds: 0.38,
        no_odds: 0.62,
        volume: 2_700_000.0,
        participants: 1923,
        end_time: 1_988_150_399,
        trend: Trend::Down,
    },
    SampleMarket {
        id: 6,
        title: "Will space tourism become mainstream by 2030?",
        description: "Regular commercial space flights available to general public",
        category: "Space",
        yes_odds: 0.45,
        no_odds: 0.55,
        volume: 1_500_000.0,
        participants: 987,
        end_time: 1_924_991_999,
        trend: Trend::Up,
    },
];
