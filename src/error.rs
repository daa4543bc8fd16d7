use thiserror::Error;

use crate::market::contract::ContractError;
use crate::wallet::ProviderError;

/// Failures surfaced by the session, reader and submitter.
///
/// None of these are fatal: the caller shows a message and the user retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no wallet provider detected")]
    ProviderUnavailable,

    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error("wallet is on chain {actual}, expected chain {expected}")]
    WrongNetwork {
        expected: u64,
        actual: u64,
        #[source]
        source: ProviderError,
    },

    #[error("wallet not connected")]
    NotConnected,

    #[error("failed to read market data: {0}")]
    Read(#[source] ContractError),

    #[error("transaction failed: {0}")]
    Submission(#[source] ContractError),

    #[error("wallet request failed: {0}")]
    Wallet(#[source] ProviderError),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0} is disabled")]
    FeatureDisabled(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
