//! Two step commit for money movements.
//!
//! An operation is first *staged* from raw user input, which parses and
//! validates everything without touching the ledger, and only a later
//! `confirm` applies it. Confirming consumes the staged operation so one
//! staging produces at most one ledger mutation.

use crate::account::{AccountId, Contact};
use crate::bank::{credited, validate_amount, Bank};
use crate::constants::PRECISION;
use crate::currency::CurrencyView;
use crate::errors::BankError;
use crate::transaction::{Transaction, TxnId};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdrawal => "withdrawal",
            OperationKind::Transfer => "transfer",
        })
    }
}

/// Transfer target captured at staging time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub id: AccountId,
    pub name: String,
    pub card_number: String,
}

/// A validated operation waiting for confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct StagedOperation {
    pub kind: OperationKind,
    pub account_id: AccountId,
    /// Canonical unit
    pub amount: Decimal,
    pub recipient: Option<Recipient>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Staged(StagedOperation),
}

/// Outcome of a confirmed operation
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub kind: OperationKind,
    pub amount: Decimal,
    /// Balance of the acting account afterwards
    pub balance: Decimal,
    /// Id of the transaction logged on the acting account
    pub transaction_id: TxnId,
    /// Set after a transfer to someone not yet in the sender's contacts
    pub suggested_contact: Option<Contact>,
}

/// Parses an amount typed in the display currency into the canonical unit.
/// Truncated to `PRECISION` places, anything not strictly positive is rejected.
pub fn parse_amount(raw: &str, view: &CurrencyView) -> Result<Decimal, BankError> {
    let typed = Decimal::from_str(raw.trim()).map_err(|_| BankError::InvalidAmount)?;
    let typed = validate_amount(typed)?;
    let canonical = view
        .to_canonical(typed)
        .round_dp_with_strategy(PRECISION, RoundingStrategy::ToZero);
    validate_amount(canonical)
}

#[derive(Debug, Default)]
pub struct ConfirmationWorkflow {
    state: WorkflowState,
    view: CurrencyView,
}

impl ConfirmationWorkflow {
    pub fn new(view: CurrencyView) -> Self {
        Self {
            state: WorkflowState::Idle,
            view,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn staged(&self) -> Option<&StagedOperation> {
        match &self.state {
            WorkflowState::Staged(op) => Some(op),
            WorkflowState::Idle => None,
        }
    }

    pub fn view(&self) -> &CurrencyView {
        &self.view
    }

    /// Switches the currency typed amounts are read in
    pub fn set_view(&mut self, view: CurrencyView) {
        self.view = view;
    }

    /// Validates an operation for `account_id` and holds it for confirmation.
    /// Staging again replaces whatever was staged. A rejected staging leaves
    /// the workflow as it was.
    pub fn stage(
        &mut self,
        bank: &Bank,
        account_id: AccountId,
        kind: OperationKind,
        raw_amount: &str,
        recipient_card: Option<&str>,
    ) -> Result<&StagedOperation, BankError> {
        let amount = parse_amount(raw_amount, &self.view)?;
        let acnt = bank.get_account(account_id)?;

        let recipient = match kind {
            OperationKind::Transfer => {
                let card = recipient_card.ok_or(BankError::InvalidFormat)?;
                let found = bank.resolve(card).map_err(|e| match e {
                    BankError::NotFound => BankError::RecipientNotFound,
                    other => other,
                })?;
                if found.id == acnt.id {
                    return Err(BankError::SelfTransfer);
                }
                Some(Recipient {
                    id: found.id,
                    name: found.name.clone(),
                    card_number: found.card_number.clone(),
                })
            }
            OperationKind::Deposit | OperationKind::Withdrawal => None,
        };

        if kind != OperationKind::Deposit && amount > acnt.balance {
            return Err(BankError::InsufficientFunds);
        }
        if kind != OperationKind::Withdrawal {
            let credited_id = recipient.as_ref().map_or(account_id, |r| r.id);
            credited(bank.get_account(credited_id)?.balance, amount)?;
        }

        tracing::debug!(account = account_id, %kind, %amount, "operation staged");
        self.state = WorkflowState::Staged(StagedOperation {
            kind,
            account_id,
            amount,
            recipient,
        });
        self.staged().ok_or(BankError::NothingStaged)
    }

    /// Drops the staged operation without side effects
    pub fn cancel(&mut self) -> Result<StagedOperation, BankError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Staged(op) => {
                tracing::debug!(account = op.account_id, kind = %op.kind, "operation cancelled");
                Ok(op)
            }
            WorkflowState::Idle => Err(BankError::NothingStaged),
        }
    }

    /// Applies the staged operation exactly once and returns to `Idle`,
    /// whether or not the ledger accepts it. Funds and recipient are checked
    /// again by the ledger at this point.
    pub fn confirm(&mut self, bank: &mut Bank) -> Result<Receipt, BankError> {
        let op = match std::mem::take(&mut self.state) {
            WorkflowState::Staged(op) => op,
            WorkflowState::Idle => return Err(BankError::NothingStaged),
        };

        match op.kind {
            OperationKind::Deposit => {
                let acnt = bank.deposit(op.account_id, op.amount)?;
                Ok(receipt(&op, acnt.balance, last_txn_id(&acnt.transactions)?, None))
            }
            OperationKind::Withdrawal => {
                let acnt = bank.withdraw(op.account_id, op.amount)?;
                Ok(receipt(&op, acnt.balance, last_txn_id(&acnt.transactions)?, None))
            }
            OperationKind::Transfer => {
                let recipient_id = op
                    .recipient
                    .as_ref()
                    .map(|r| r.id)
                    .ok_or(BankError::RecipientNotFound)?;
                let (sender, _) = bank.transfer(op.account_id, recipient_id, op.amount)?;
                let balance = sender.balance;
                let txn_id = last_txn_id(&sender.transactions)?;
                let suggestion = bank.suggested_contact(op.account_id, recipient_id);
                Ok(receipt(&op, balance, txn_id, suggestion))
            }
        }
    }
}

fn last_txn_id(log: &[Transaction]) -> Result<TxnId, BankError> {
    log.last().map(|t| t.id).ok_or(BankError::NotFound)
}

fn receipt(
    op: &StagedOperation,
    balance: Decimal,
    transaction_id: TxnId,
    suggested_contact: Option<Contact>,
) -> Receipt {
    Receipt {
        kind: op.kind,
        amount: op.amount,
        balance,
        transaction_id,
        suggested_contact,
    }
}
