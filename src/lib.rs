//! Client core for the Nomo prediction market on BNB Smart Chain.

pub mod chain;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod market;
pub mod prefs;
pub mod side;
pub mod wallet;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
