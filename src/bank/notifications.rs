use super::Bank;
use crate::account::{Account, AccountId};
use crate::errors::BankError;

impl Bank {
    /// Flags every notification as read. Leaves the account untouched when
    /// nothing is unread.
    pub fn mark_all_read(&mut self, id: AccountId) -> Result<&Account, BankError> {
        let indx = self.index_of(id)?;
        let notifications = &mut self.accounts[indx].notifications;
        if notifications.iter().any(|n| !n.read) {
            for notification in notifications.iter_mut() {
                notification.read = true;
            }
            tracing::debug!(account = id, "notifications marked read");
        }
        Ok(&self.accounts[indx])
    }

    /// Empties the mailbox
    pub fn clear_all(&mut self, id: AccountId) -> Result<&Account, BankError> {
        let indx = self.index_of(id)?;
        let cleared = self.accounts[indx].notifications.len();
        self.accounts[indx].notifications.clear();
        tracing::debug!(account = id, cleared, "notifications cleared");
        Ok(&self.accounts[indx])
    }

    pub fn unread_count(&self, id: AccountId) -> Result<usize, BankError> {
        Ok(self.get_account(id)?.unread_count())
    }
}
