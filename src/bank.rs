use crate::account::{Account, AccountId, Contact, Notification, NotificationId};
use crate::config::BankConfig;
use crate::errors::BankError;
use crate::transaction::{Transaction, TxnId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
mod contacts;
mod identity;
mod notifications;
mod stream_process;
mod transactions;

pub use stream_process::SessionSummary;
pub use transactions::{amount_from_f64, credited, validate_amount};

/// In-memory store of every account and the only owner of balances
#[derive(Debug)]
pub struct Bank {
    /// List of accounts in order of their creation
    accounts: Vec<Account>,
    /// O(1) lookups into `accounts`
    acnt_map: HashMap<AccountId, usize>,
    card_map: HashMap<String, usize>,
    name_map: HashMap<String, usize>,

    /// Logged in account, if any
    current: Option<AccountId>,

    next_account_id: AccountId,
    next_txn_id: TxnId,
    next_notification_id: NotificationId,

    config: BankConfig,
    /// Card number source
    rng: StdRng,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank {
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    pub fn with_config(config: BankConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic card numbers, for tests and replays
    pub fn with_seed(config: BankConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: BankConfig, rng: StdRng) -> Self {
        Self {
            accounts: vec![],
            acnt_map: HashMap::new(),
            card_map: HashMap::new(),
            name_map: HashMap::new(),
            current: None,
            next_account_id: 1,
            next_txn_id: 1,
            next_notification_id: 1,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    fn index_of(&self, id: AccountId) -> Result<usize, BankError> {
        self.acnt_map.get(&id).copied().ok_or(BankError::NotFound)
    }

    fn alloc_txn_id(&mut self) -> TxnId {
        let id = self.next_txn_id;
        self.next_txn_id += 1;
        id
    }

    fn alloc_notification_id(&mut self) -> NotificationId {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        id
    }

    pub fn get_account(&self, id: AccountId) -> Result<&Account, BankError> {
        Ok(&self.accounts[self.index_of(id)?])
    }

    /// Accounts in order of their creation
    pub fn list_accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get_transactions(&self, id: AccountId) -> Result<&[Transaction], BankError> {
        Ok(&self.get_account(id)?.transactions)
    }

    pub fn get_contacts(&self, id: AccountId) -> Result<&[Contact], BankError> {
        Ok(&self.get_account(id)?.contacts)
    }

    pub fn get_notifications(&self, id: AccountId) -> Result<&[Notification], BankError> {
        Ok(&self.get_account(id)?.notifications)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.name_map.get(name).map(|ii| &self.accounts[*ii])
    }

    pub fn find_by_card(&self, card_number: &str) -> Option<&Account> {
        self.card_map.get(card_number).map(|ii| &self.accounts[*ii])
    }
}
