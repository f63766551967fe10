//! Thread-safe handle around a [`Bank`].
//!
//! Each command takes the lock once and holds it for the whole command, so
//! the debit and credit of a transfer are a single critical section relative
//! to any other command on either account.

use crate::account::{Account, AccountId, Contact, Notification};
use crate::bank::Bank;
use crate::errors::BankError;
use crate::transaction::Transaction;
use crate::workflow::{ConfirmationWorkflow, OperationKind, Receipt, StagedOperation};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SharedBank {
    inner: Arc<Mutex<Bank>>,
}

impl SharedBank {
    pub fn new(bank: Bank) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bank)),
        }
    }

    /// Runs `f` with the bank locked
    pub fn with<T>(&self, f: impl FnOnce(&mut Bank) -> T) -> T {
        let mut bank = self.inner.lock();
        f(&mut *bank)
    }

    pub fn register(&self, name: &str, password: &str) -> Result<Account, BankError> {
        self.with(|bank| bank.register(name, password).cloned())
    }

    pub fn login(&self, name: &str, password: &str) -> Result<Account, BankError> {
        self.with(|bank| bank.login(name, password).cloned())
    }

    pub fn logout(&self) {
        self.with(Bank::logout)
    }

    pub fn get_account(&self, id: AccountId) -> Result<Account, BankError> {
        self.with(|bank| bank.get_account(id).cloned())
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        self.with(|bank| bank.list_accounts().to_vec())
    }

    pub fn get_transactions(&self, id: AccountId) -> Result<Vec<Transaction>, BankError> {
        self.with(|bank| bank.get_transactions(id).map(<[_]>::to_vec))
    }

    pub fn get_contacts(&self, id: AccountId) -> Result<Vec<Contact>, BankError> {
        self.with(|bank| bank.get_contacts(id).map(<[_]>::to_vec))
    }

    pub fn get_notifications(&self, id: AccountId) -> Result<Vec<Notification>, BankError> {
        self.with(|bank| bank.get_notifications(id).map(<[_]>::to_vec))
    }

    pub fn deposit(&self, id: AccountId, amount: Decimal) -> Result<Account, BankError> {
        self.with(|bank| bank.deposit(id, amount).cloned())
    }

    pub fn withdraw(&self, id: AccountId, amount: Decimal) -> Result<Account, BankError> {
        self.with(|bank| bank.withdraw(id, amount).cloned())
    }

    pub fn transfer(
        &self,
        sender_id: AccountId,
        recipient_id: AccountId,
        amount: Decimal,
    ) -> Result<(Account, Account), BankError> {
        self.with(|bank| {
            bank.transfer(sender_id, recipient_id, amount)
                .map(|(s, r)| (s.clone(), r.clone()))
        })
    }

    pub fn add_contact(&self, id: AccountId, contact: Contact) -> Result<Account, BankError> {
        self.with(|bank| bank.add_contact(id, contact).cloned())
    }

    pub fn mark_all_read(&self, id: AccountId) -> Result<Account, BankError> {
        self.with(|bank| bank.mark_all_read(id).cloned())
    }

    pub fn clear_all(&self, id: AccountId) -> Result<Account, BankError> {
        self.with(|bank| bank.clear_all(id).cloned())
    }

    pub fn stage(
        &self,
        workflow: &mut ConfirmationWorkflow,
        id: AccountId,
        kind: OperationKind,
        raw_amount: &str,
        recipient_card: Option<&str>,
    ) -> Result<StagedOperation, BankError> {
        self.with(|bank| {
            workflow
                .stage(bank, id, kind, raw_amount, recipient_card)
                .cloned()
        })
    }

    pub fn confirm(&self, workflow: &mut ConfirmationWorkflow) -> Result<Receipt, BankError> {
        self.with(|bank| workflow.confirm(bank))
    }

    /// Sum of every balance, `None` if it does not fit a `Decimal`
    pub fn total_balance(&self) -> Option<Decimal> {
        self.with(|bank| {
            bank.list_accounts()
                .iter()
                .try_fold(Decimal::ZERO, |total, a| total.checked_add(a.balance))
        })
    }
}
