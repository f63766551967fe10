use super::Bank;
use crate::account::{Account, AccountId, Contact};
use crate::card_number::is_valid_format;
use crate::errors::BankError;

impl Bank {
    /// Appends `contact` to the account's address book.
    /// A card number is listed at most once and never the owner's own card.
    pub fn add_contact(&mut self, id: AccountId, contact: Contact) -> Result<&Account, BankError> {
        if !is_valid_format(&contact.card_number) {
            return Err(BankError::InvalidFormat);
        }
        let indx = self.index_of(id)?;
        let acnt = &mut self.accounts[indx];
        if acnt.has_contact(&contact.card_number) {
            return Err(BankError::DuplicateContact);
        }
        if acnt.card_number == contact.card_number {
            return Err(BankError::SelfContact);
        }

        tracing::info!(account = id, card = %contact.card_number, "contact added");
        acnt.contacts.push(contact);
        Ok(&self.accounts[indx])
    }

    /// Turns typed card text into the account holding that card
    pub fn resolve(&self, card_text: &str) -> Result<&Account, BankError> {
        if !is_valid_format(card_text) {
            return Err(BankError::InvalidFormat);
        }
        self.find_by_card(card_text).ok_or(BankError::NotFound)
    }

    /// Prospective contact for `card_text`, checked the way the add-contact
    /// dialog checks it. Nothing is stored.
    pub fn lookup_contact(&self, id: AccountId, card_text: &str) -> Result<Contact, BankError> {
        if !is_valid_format(card_text) {
            return Err(BankError::InvalidFormat);
        }
        let acnt = self.get_account(id)?;
        if acnt.card_number == card_text {
            return Err(BankError::SelfContact);
        }
        if acnt.has_contact(card_text) {
            return Err(BankError::DuplicateContact);
        }
        let found = self.resolve(card_text)?;
        Ok(Contact {
            name: found.name.clone(),
            card_number: found.card_number.clone(),
        })
    }

    /// Recipient as a contact when the sender has not saved them yet
    pub fn suggested_contact(&self, sender_id: AccountId, recipient_id: AccountId) -> Option<Contact> {
        let sender = self.get_account(sender_id).ok()?;
        let recipient = self.get_account(recipient_id).ok()?;
        if sender_id == recipient_id || sender.has_contact(&recipient.card_number) {
            return None;
        }
        Some(Contact {
            name: recipient.name.clone(),
            card_number: recipient.card_number.clone(),
        })
    }
}
