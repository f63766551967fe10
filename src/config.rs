use crate::constants::DEFAULT_CARD_NUMBER_ATTEMPTS;
use crate::currency::{default_exchange_rate, Currency, CurrencyView};
use rust_decimal::Decimal;

/// Knobs for a bank instance
#[derive(Debug, Clone, PartialEq)]
pub struct BankConfig {
    /// EUR -> USD, used for display and for amounts typed in USD
    pub exchange_rate: Decimal,
    pub display_currency: Currency,
    /// Retry cap for the card number generator
    pub card_number_attempts: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            exchange_rate: default_exchange_rate(),
            display_currency: Currency::Eur,
            card_number_attempts: DEFAULT_CARD_NUMBER_ATTEMPTS,
        }
    }
}

impl BankConfig {
    pub fn currency_view(&self) -> CurrencyView {
        CurrencyView::new(self.display_currency, self.exchange_rate)
    }
}
