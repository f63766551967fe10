use crate::errors::BankError;
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub type AccountId = u64;
pub type NotificationId = u64;

/// Card look, one of a fixed palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    #[default]
    Default,
    Ocean,
    Sunset,
    Emerald,
    Midnight,
    Amethyst,
}

impl CardStyle {
    pub const ALL: [CardStyle; 6] = [
        CardStyle::Default,
        CardStyle::Ocean,
        CardStyle::Sunset,
        CardStyle::Emerald,
        CardStyle::Midnight,
        CardStyle::Amethyst,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CardStyle::Default => "default",
            CardStyle::Ocean => "ocean",
            CardStyle::Sunset => "sunset",
            CardStyle::Emerald => "emerald",
            CardStyle::Midnight => "midnight",
            CardStyle::Amethyst => "amethyst",
        }
    }
}

impl FromStr for CardStyle {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardStyle::ALL
            .iter()
            .find(|style| style.key() == s)
            .copied()
            .ok_or_else(|| BankError::UnknownCardStyle(s.to_string()))
    }
}

impl fmt::Display for CardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub card_number: String,
}

/// Inbound alert, only produced on the receiving side of a transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Struct to hold data and methods for an account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: AccountId,

    /// Unique across the bank, compared case-sensitively
    pub name: String,

    /// Compared by plain equality, never serialized
    #[serde(skip)]
    pub(crate) password: String,

    /// `NNNN-NNNN-NNNN-NNNN`, unique across the bank
    pub card_number: String,

    /// Canonical unit, never negative
    pub balance: Decimal,

    pub card_style: CardStyle,

    /// Insertion (chronological) order
    pub transactions: Vec<Transaction>,

    pub contacts: Vec<Contact>,

    /// Insertion (chronological) order
    pub notifications: Vec<Notification>,
}

impl Account {
    pub fn new(id: AccountId, name: &str, password: &str, card_number: String) -> Self {
        Self {
            id,
            name: name.to_string(),
            password: password.to_string(),
            card_number,
            balance: Decimal::ZERO,
            card_style: CardStyle::default(),
            transactions: vec![],
            contacts: vec![],
            notifications: vec![],
        }
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn has_contact(&self, card_number: &str) -> bool {
        self.contacts.iter().any(|c| c.card_number == card_number)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Log newest first, storage order is untouched
    pub fn recent_first(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    /// Sum of every logged movement, equals `balance` for a consistent account
    pub fn replayed_balance(&self) -> Decimal {
        self.transactions.iter().map(|t| t.signed_amount()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{Account, CardStyle};
    use crate::errors::BankError;
    use crate::transaction::Transaction;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn tst_account() -> Account {
        Account::new(1, "Ana", "pw1", "1234-5678-9012-3456".to_string())
    }

    #[test]
    fn tst_new_account() {
        let accnt = tst_account();
        assert_eq!(accnt.balance, dec!(0));
        assert_eq!(accnt.card_style, CardStyle::Default);
        assert!(accnt.password_matches("pw1"));
        assert!(!accnt.password_matches("PW1"));
    }

    #[test]
    fn tst_recent_first_and_replay() {
        let mut accnt = tst_account();
        let now = Utc::now();
        accnt.transactions.push(Transaction::deposit(1, dec!(100), now));
        accnt.transactions.push(Transaction::withdrawal(2, dec!(30), now));
        let ids: Vec<u64> = accnt.recent_first().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(accnt.transactions[0].id, 1, "Storage keeps insertion order");
        assert_eq!(accnt.replayed_balance(), dec!(70));
    }

    #[test]
    fn tst_card_style_from_str() {
        assert_eq!("ocean".parse::<CardStyle>(), Ok(CardStyle::Ocean));
        assert_eq!(
            "Ocean".parse::<CardStyle>(),
            Err(BankError::UnknownCardStyle("Ocean".to_string()))
        );
        for style in CardStyle::ALL {
            assert_eq!(style.key().parse::<CardStyle>(), Ok(style));
        }
    }
}
