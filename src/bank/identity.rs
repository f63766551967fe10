use super::Bank;
use crate::account::{Account, AccountId, CardStyle};
use crate::card_number;
use crate::errors::BankError;

fn check_credentials_present(name: &str, password: &str) -> Result<(), BankError> {
    if name.is_empty() || password.is_empty() {
        return Err(BankError::MissingCredentials);
    }
    Ok(())
}

impl Bank {
    /// Creates an account with zero balance and a fresh card number.
    /// The new account becomes the current one.
    pub fn register(&mut self, name: &str, password: &str) -> Result<&Account, BankError> {
        check_credentials_present(name, password)?;
        if self.name_map.contains_key(name) {
            return Err(BankError::DuplicateName);
        }

        let card_map = &self.card_map;
        let card = card_number::generate(
            &mut self.rng,
            |candidate| card_map.contains_key(candidate),
            self.config.card_number_attempts,
        )?;

        let id = self.next_account_id;
        self.next_account_id += 1;

        let indx = self.accounts.len();
        self.acnt_map.insert(id, indx);
        self.card_map.insert(card.clone(), indx);
        self.name_map.insert(name.to_string(), indx);
        self.accounts.push(Account::new(id, name, password, card));
        self.current = Some(id);

        tracing::info!(account = id, %name, "registered");
        Ok(&self.accounts[indx])
    }

    /// Exact name and password match; the account becomes the current one
    pub fn login(&mut self, name: &str, password: &str) -> Result<&Account, BankError> {
        check_credentials_present(name, password)?;
        let indx = match self.name_map.get(name) {
            Some(ii) if self.accounts[*ii].password_matches(password) => *ii,
            _ => {
                tracing::warn!(%name, "login rejected");
                return Err(BankError::InvalidCredentials);
            }
        };
        let id = self.accounts[indx].id;
        self.current = Some(id);
        tracing::info!(account = id, "logged in");
        Ok(&self.accounts[indx])
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.current.take() {
            tracing::info!(account = id, "logged out");
        }
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.current.and_then(|id| self.get_account(id).ok())
    }

    /// Id of the logged in account or `NotLoggedIn`
    pub fn require_current(&self) -> Result<AccountId, BankError> {
        self.current.ok_or(BankError::NotLoggedIn)
    }

    pub fn set_card_style(&mut self, id: AccountId, style_key: &str) -> Result<&Account, BankError> {
        let style: CardStyle = style_key.parse()?;
        let indx = self.index_of(id)?;
        self.accounts[indx].card_style = style;
        tracing::info!(account = id, %style, "card style changed");
        Ok(&self.accounts[indx])
    }
}
