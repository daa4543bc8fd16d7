//! In-memory wallet and contract doubles shared by unit tests.

use alloy::primitives::{address, Address, TxHash, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::chain::ChainConfig;
use crate::market::contract::{ContractClient, ContractError, MarketContract, RawMarket};
use crate::side::Side;
use crate::wallet::{ProviderError, WalletProvider};

/// One market as the mock contract stores it: raw record plus YES/NO pools.
#[derive(Debug, Clone)]
pub struct MockMarket {
    pub raw: RawMarket,
    pub yes: U256,
    pub no: U256,
}

impl MockMarket {
    /// Market with pools given in whole coins (18 decimals).
    pub fn coins(question: &str, end_time: u64, yes: u64, no: u64) -> Self {
        let yes = coin(yes);
        let no = coin(no);
        Self {
            raw: RawMarket {
                question: question.to_string(),
                end_time: U256::from(end_time),
                total_liquidity: yes + no,
                resolved: false,
                outcome: false,
            },
            yes,
            no,
        }
    }
}

pub fn coin(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

#[derive(Clone, Default)]
pub struct MockContract {
    pub account: Address,
    pub markets: Vec<MockMarket>,
    /// `markets(id)` fails for this id.
    pub fail_read: Option<u64>,
    /// Sends fail as if the user rejected the signature.
    pub reject_sends: bool,
    /// Every contract call, reads and writes.
    pub calls: Arc<AtomicUsize>,
    /// `(method, args)` of each submitted transaction.
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockContract {
    pub fn with_markets(markets: Vec<MockMarket>) -> Self {
        Self {
            markets,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn lookup(&self, id: U256) -> Result<&MockMarket, ContractError> {
        let idx: usize = id
            .try_into()
            .map_err(|_| ContractError::Rpc("id out of range".to_string()))?;
        self.markets
            .get(idx)
            .ok_or_else(|| ContractError::Rpc(format!("execution reverted: no market {}", idx)))
    }

    fn send(&self, method: &str, args: String) -> Result<TxHash, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_sends {
            return Err(ContractError::Rpc("user rejected transaction".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((method.to_string(), args));
        Ok(TxHash::with_last_byte(sent.len() as u8))
    }
}

#[async_trait]
impl MarketContract for MockContract {
    async fn market_count(&self) -> Result<U256, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(U256::from(self.markets.len()))
    }

    async fn market(&self, id: U256) -> Result<RawMarket, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_read.is_some_and(|f| U256::from(f) == id) {
            return Err(ContractError::Rpc("connection reset".to_string()));
        }
        Ok(self.lookup(id)?.raw.clone())
    }

    async fn liquidity(&self, id: U256, side: Side) -> Result<U256, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let m = self.lookup(id)?;
        Ok(match side {
            Side::Yes => m.yes,
            Side::No => m.no,
        })
    }

    async fn create_market(
        &self,
        question: String,
        end_time: U256,
    ) -> Result<TxHash, ContractError> {
        self.send("createMarket", format!("{},{}", question, end_time))
    }

    async fn add_liquidity(
        &self,
        id: U256,
        side: Side,
        value: U256,
    ) -> Result<TxHash, ContractError> {
        self.send("addLiquidity", format!("{},{},{}", id, side.as_position(), value))
    }

    async fn claim_winnings(&self, id: U256) -> Result<TxHash, ContractError> {
        self.send("claimWinnings", id.to_string())
    }
}

pub struct MockWallet {
    pub accounts: Vec<Address>,
    pub chain_id: u64,
    pub reject_accounts: bool,
    pub reject_switch: bool,
    pub account_requests: AtomicUsize,
    pub switch_calls: AtomicUsize,
    pub switched_to: Mutex<Option<String>>,
    /// Template for bound handles; clones share its counters.
    pub contract: MockContract,
}

impl MockWallet {
    pub const ALICE: Address = address!("00000000000000000000000000000000000a11ce");
    pub const BOB: Address = address!("0000000000000000000000000000000000000b0b");

    pub fn new(accounts: Vec<Address>, chain_id: u64) -> Self {
        Self {
            accounts,
            chain_id,
            reject_accounts: false,
            reject_switch: false,
            account_requests: AtomicUsize::new(0),
            switch_calls: AtomicUsize::new(0),
            switched_to: Mutex::new(None),
            contract: MockContract::default(),
        }
    }

    pub fn with_contract(mut self, contract: MockContract) -> Self {
        self.contract = contract;
        self
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    type Contract = MockContract;

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        if self.reject_accounts {
            return Err(ProviderError::Rejected("user rejected the request".to_string()));
        }
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.chain_id)
    }

    async fn switch_chain(&self, chain: &ChainConfig) -> Result<(), ProviderError> {
        self.switch_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_switch {
            return Err(ProviderError::Rejected("user rejected the switch".to_string()));
        }
        *self.switched_to.lock().unwrap() = Some(chain.chain_id_hex());
        Ok(())
    }

    fn bind(&self, account: Address) -> MockContract {
        MockContract {
            account,
            ..self.contract.clone()
        }
    }
}

/// Wallet on chain 56 with one account whose contract handles go through
/// `provider`, typically a mocked alloy transport.
pub struct ProviderWallet {
    pub provider: DynProvider,
    pub contract: Option<Address>,
}

#[async_trait]
impl WalletProvider for ProviderWallet {
    type Contract = ContractClient;

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(vec![MockWallet::ALICE])
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(56)
    }

    async fn switch_chain(&self, _chain: &ChainConfig) -> Result<(), ProviderError> {
        Ok(())
    }

    fn bind(&self, account: Address) -> ContractClient {
        ContractClient::new(self.provider.clone(), self.contract, account)
    }
}
