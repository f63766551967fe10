use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

pub type TxnId = u64;

/// Financial events recorded in an account's log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxnKind {
    Deposit,
    Withdrawal,
    TransferSent,
    TransferReceived,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Deposit => "deposit",
            TxnKind::Withdrawal => "withdrawal",
            TxnKind::TransferSent => "transfer_sent",
            TxnKind::TransferReceived => "transfer_received",
        }
    }

    /// True for kinds which add funds to the owning account
    pub fn is_credit(&self) -> bool {
        matches!(self, TxnKind::Deposit | TxnKind::TransferReceived)
    }
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record appended to an account's log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: TxnId,
    pub kind: TxnKind,
    /// Always positive, direction is given by `kind`
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
    /// Other party's name, only set for transfers
    pub counterparty_name: Option<String>,
    /// Recipient's card, only set on `TransferSent`
    pub counterparty_card: Option<String>,
}

impl Transaction {
    pub fn deposit(id: TxnId, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: TxnKind::Deposit,
            amount,
            timestamp,
            counterparty_name: None,
            counterparty_card: None,
        }
    }

    pub fn withdrawal(id: TxnId, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: TxnKind::Withdrawal,
            ..Self::deposit(id, amount, timestamp)
        }
    }

    pub fn transfer_sent(
        id: TxnId,
        amount: Decimal,
        timestamp: DateTime<Utc>,
        recipient_name: &str,
        recipient_card: &str,
    ) -> Self {
        Self {
            id,
            kind: TxnKind::TransferSent,
            amount,
            timestamp,
            counterparty_name: Some(recipient_name.to_string()),
            counterparty_card: Some(recipient_card.to_string()),
        }
    }

    pub fn transfer_received(
        id: TxnId,
        amount: Decimal,
        timestamp: DateTime<Utc>,
        sender_name: &str,
    ) -> Self {
        Self {
            id,
            kind: TxnKind::TransferReceived,
            amount,
            timestamp,
            counterparty_name: Some(sender_name.to_string()),
            counterparty_card: None,
        }
    }

    /// Amount with the sign of its effect on the balance
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}
