use super::Bank;
use crate::account::{Account, AccountId, Notification};
use crate::errors::BankError;
use crate::transaction::Transaction;
use chrono::Utc;
use rust_decimal::Decimal;

/// Only strictly positive amounts may move money
pub fn validate_amount(amount: Decimal) -> Result<Decimal, BankError> {
    if amount <= Decimal::ZERO {
        return Err(BankError::InvalidAmount);
    }
    Ok(amount)
}

/// Converts a float amount, rejecting NaN, infinities, zero and negatives
pub fn amount_from_f64(value: f64) -> Result<Decimal, BankError> {
    if !value.is_finite() {
        return Err(BankError::InvalidAmount);
    }
    let amount = Decimal::try_from(value).map_err(|_| BankError::InvalidAmount)?;
    validate_amount(amount)
}

/// Balance after crediting `amount`, or `BalanceOverflow`
pub fn credited(balance: Decimal, amount: Decimal) -> Result<Decimal, BankError> {
    balance
        .checked_add(amount)
        .ok_or(BankError::BalanceOverflow)
}

impl Bank {
    /// Credits `amount` and logs a deposit
    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<&Account, BankError> {
        let amount = validate_amount(amount)?;
        let indx = self.index_of(id)?;
        let balance = credited(self.accounts[indx].balance, amount)?;
        let txn_id = self.alloc_txn_id();

        let acnt = &mut self.accounts[indx];
        acnt.balance = balance;
        acnt.transactions
            .push(Transaction::deposit(txn_id, amount, Utc::now()));

        tracing::info!(account = id, %amount, balance = %acnt.balance, "deposit applied");
        Ok(&self.accounts[indx])
    }

    /// Debits `amount` and logs a withdrawal, never overdraws
    pub fn withdraw(&mut self, id: AccountId, amount: Decimal) -> Result<&Account, BankError> {
        let amount = validate_amount(amount)?;
        let indx = self.index_of(id)?;
        if self.accounts[indx].balance < amount {
            return Err(BankError::InsufficientFunds);
        }
        let txn_id = self.alloc_txn_id();

        let acnt = &mut self.accounts[indx];
        acnt.balance -= amount;
        acnt.transactions
            .push(Transaction::withdrawal(txn_id, amount, Utc::now()));

        tracing::info!(account = id, %amount, balance = %acnt.balance, "withdrawal applied");
        Ok(&self.accounts[indx])
    }

    /// Moves `amount` from sender to recipient.
    /// Both logs get their half of the transfer under consecutive ids and the
    /// recipient gets an unread notification. Every check runs before any
    /// mutation.
    pub fn transfer(
        &mut self,
        sender_id: AccountId,
        recipient_id: AccountId,
        amount: Decimal,
    ) -> Result<(&Account, &Account), BankError> {
        let amount = validate_amount(amount)?;
        let s_indx = self.index_of(sender_id)?;
        let r_indx = self
            .index_of(recipient_id)
            .map_err(|_| BankError::RecipientNotFound)?;
        if s_indx == r_indx {
            return Err(BankError::SelfTransfer);
        }
        if self.accounts[s_indx].balance < amount {
            return Err(BankError::InsufficientFunds);
        }
        let recipient_balance = credited(self.accounts[r_indx].balance, amount)?;

        let now = Utc::now();
        let sent_id = self.alloc_txn_id();
        let received_id = self.alloc_txn_id();
        let notification_id = self.alloc_notification_id();
        let sender_name = self.accounts[s_indx].name.clone();
        let recipient_name = self.accounts[r_indx].name.clone();
        let recipient_card = self.accounts[r_indx].card_number.clone();
        let message = format!(
            "You received {} from {}.",
            self.config.currency_view().format(amount),
            sender_name
        );

        let sender = &mut self.accounts[s_indx];
        sender.balance -= amount;
        sender.transactions.push(Transaction::transfer_sent(
            sent_id,
            amount,
            now,
            &recipient_name,
            &recipient_card,
        ));

        let recipient = &mut self.accounts[r_indx];
        recipient.balance = recipient_balance;
        recipient.transactions.push(Transaction::transfer_received(
            received_id,
            amount,
            now,
            &sender_name,
        ));
        recipient.notifications.push(Notification {
            id: notification_id,
            message,
            timestamp: now,
            read: false,
        });

        tracing::info!(
            sender = sender_id,
            recipient = recipient_id,
            %amount,
            "transfer applied"
        );
        Ok((&self.accounts[s_indx], &self.accounts[r_indx]))
    }
}

#[cfg(test)]
pub mod tests {
    use super::{amount_from_f64, validate_amount};
    use crate::bank::tests::{tst_bank, tst_register};
    use crate::bank::Bank;
    use crate::config::BankConfig;
    use crate::currency::Currency;
    use crate::errors::BankError;
    use crate::transaction::TxnKind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn funded_pair(balance: Decimal) -> (Bank, u64, u64) {
        let mut bank = tst_bank();
        let ana = tst_register(&mut bank, "Ana");
        let luis = tst_register(&mut bank, "Luis");
        if balance > Decimal::ZERO {
            bank.deposit(ana, balance).unwrap();
        }
        (bank, ana, luis)
    }

    #[test]
    fn tst_validate_amount() {
        assert_eq!(validate_amount(dec!(0.01)), Ok(dec!(0.01)));
        assert_eq!(validate_amount(dec!(0)), Err(BankError::InvalidAmount));
        assert_eq!(validate_amount(dec!(-3)), Err(BankError::InvalidAmount));
    }

    #[test]
    fn tst_amount_from_f64() {
        assert_eq!(amount_from_f64(12.5), Ok(dec!(12.5)));
        assert_eq!(amount_from_f64(f64::NAN), Err(BankError::InvalidAmount));
        assert_eq!(amount_from_f64(f64::INFINITY), Err(BankError::InvalidAmount));
        assert_eq!(
            amount_from_f64(f64::NEG_INFINITY),
            Err(BankError::InvalidAmount)
        );
        assert_eq!(amount_from_f64(0.0), Err(BankError::InvalidAmount));
        assert_eq!(amount_from_f64(-1.0), Err(BankError::InvalidAmount));
    }

    #[test]
    fn tst_deposit() {
        let (mut bank, ana, _) = funded_pair(Decimal::ZERO);
        let accnt = bank.deposit(ana, dec!(100)).unwrap();
        assert_eq!(accnt.balance, dec!(100));
        assert_eq!(accnt.transactions.len(), 1);
        assert_eq!(accnt.transactions[0].kind, TxnKind::Deposit);
        assert_eq!(accnt.transactions[0].amount, dec!(100));

        for bad in [dec!(0), dec!(-5)] {
            let res = bank.deposit(ana, bad).map(|a| a.id);
            assert_eq!(res, Err(BankError::InvalidAmount));
        }
        assert_eq!(
            bank.deposit(999, dec!(1)).map(|a| a.id),
            Err(BankError::NotFound)
        );
        let accnt = bank.get_account(ana).unwrap();
        assert_eq!(accnt.balance, dec!(100), "Rejected deposits change nothing");
        assert_eq!(accnt.transactions.len(), 1);
    }

    #[test]
    fn tst_withdraw() {
        let (mut bank, ana, _) = funded_pair(dec!(60));

        let res = bank.withdraw(ana, dec!(1000)).map(|a| a.id);
        assert_eq!(res, Err(BankError::InsufficientFunds));
        let res = bank.withdraw(ana, dec!(0)).map(|a| a.id);
        assert_eq!(res, Err(BankError::InvalidAmount));
        assert_eq!(bank.get_account(ana).unwrap().balance, dec!(60));
        assert_eq!(bank.get_transactions(ana).unwrap().len(), 1);

        let accnt = bank.withdraw(ana, dec!(60)).unwrap();
        assert_eq!(accnt.balance, dec!(0), "Whole balance may be withdrawn");
        assert_eq!(accnt.transactions[1].kind, TxnKind::Withdrawal);
        assert_eq!(accnt.replayed_balance(), accnt.balance);
    }

    #[test]
    fn tst_transfer() {
        let (mut bank, ana, luis) = funded_pair(dec!(100));
        let (sender, recipient) = bank.transfer(ana, luis, dec!(40)).unwrap();
        assert_eq!(sender.balance, dec!(60));
        assert_eq!(recipient.balance, dec!(40));

        let sent = sender.transactions.last().unwrap();
        let received = recipient.transactions.last().unwrap();
        assert_eq!(sent.kind, TxnKind::TransferSent);
        assert_eq!(received.kind, TxnKind::TransferReceived);
        assert_eq!(sent.amount, received.amount);
        assert_eq!(received.id, sent.id + 1, "Halves are created back to back");
        assert_eq!(sent.timestamp, received.timestamp);
        assert_eq!(sent.counterparty_name.as_deref(), Some("Luis"));
        assert_eq!(
            sent.counterparty_card.as_deref(),
            Some(recipient.card_number.as_str())
        );
        assert_eq!(received.counterparty_name.as_deref(), Some("Ana"));

        assert_eq!(recipient.notifications.len(), 1);
        assert!(!recipient.notifications[0].read);
        assert!(recipient.notifications[0].message.contains("Ana"));
        assert!(recipient.notifications[0].message.contains("40,00 €"));
        assert!(sender.notifications.is_empty());
    }

    #[test]
    fn tst_transfer_rejections() {
        let (mut bank, ana, luis) = funded_pair(dec!(10));

        let res = bank.transfer(ana, luis, dec!(10.01)).map(|_| ());
        assert_eq!(res, Err(BankError::InsufficientFunds));
        let res = bank.transfer(ana, ana, dec!(1)).map(|_| ());
        assert_eq!(res, Err(BankError::SelfTransfer));
        let res = bank.transfer(ana, 999, dec!(1)).map(|_| ());
        assert_eq!(res, Err(BankError::RecipientNotFound));
        let res = bank.transfer(999, luis, dec!(1)).map(|_| ());
        assert_eq!(res, Err(BankError::NotFound));
        let res = bank.transfer(ana, luis, dec!(-1)).map(|_| ());
        assert_eq!(res, Err(BankError::InvalidAmount));

        assert_eq!(bank.get_account(ana).unwrap().balance, dec!(10));
        assert_eq!(bank.get_account(luis).unwrap().balance, dec!(0));
        assert!(bank.get_transactions(luis).unwrap().is_empty());
        assert!(bank.get_notifications(luis).unwrap().is_empty());
    }

    #[test]
    fn tst_deposit_overflow() {
        let (mut bank, ana, _) = funded_pair(Decimal::MAX);
        let res = bank.deposit(ana, dec!(1)).map(|a| a.id);
        assert_eq!(res, Err(BankError::BalanceOverflow));
        let accnt = bank.get_account(ana).unwrap();
        assert_eq!(accnt.balance, Decimal::MAX);
        assert_eq!(accnt.transactions.len(), 1);
    }

    #[test]
    fn tst_transfer_overflow_leaves_both_untouched() {
        let (mut bank, ana, luis) = funded_pair(dec!(5));
        bank.deposit(luis, Decimal::MAX).unwrap();
        let res = bank.transfer(ana, luis, dec!(1)).map(|_| ());
        assert_eq!(res, Err(BankError::BalanceOverflow));
        assert_eq!(bank.get_account(ana).unwrap().balance, dec!(5));
        assert_eq!(bank.get_transactions(ana).unwrap().len(), 1);
        assert_eq!(bank.get_account(luis).unwrap().balance, Decimal::MAX);
        assert!(bank.get_notifications(luis).unwrap().is_empty());
    }

    #[test]
    fn tst_usd_transfer_of_max_amount() {
        let config = BankConfig {
            display_currency: Currency::Usd,
            ..BankConfig::default()
        };
        let mut bank = Bank::with_seed(config, 5);
        let ana = tst_register(&mut bank, "Ana");
        let luis = tst_register(&mut bank, "Luis");
        bank.deposit(ana, Decimal::MAX).unwrap();

        let (sender, recipient) = bank.transfer(ana, luis, Decimal::MAX).unwrap();
        assert_eq!(sender.balance, dec!(0));
        assert_eq!(recipient.balance, Decimal::MAX);
        let message = &recipient.notifications[0].message;
        assert!(message.ends_with(",00 € from Ana."), "{message}");
    }

    #[test]
    fn tst_transfer_conserves_total() {
        let (mut bank, ana, luis) = funded_pair(dec!(250.75));
        bank.deposit(luis, dec!(19.25)).unwrap();
        let total = |bank: &Bank| -> Decimal { bank.list_accounts().iter().map(|a| a.balance).sum() };
        let before = total(&bank);

        for amount in [dec!(0.01), dec!(100), dec!(33.33), dec!(117.41)] {
            bank.transfer(ana, luis, amount).unwrap();
            assert_eq!(total(&bank), before);
            bank.transfer(luis, ana, amount).unwrap();
            assert_eq!(total(&bank), before);
        }
        for accnt in bank.list_accounts() {
            assert_eq!(accnt.replayed_balance(), accnt.balance);
        }
    }
}
