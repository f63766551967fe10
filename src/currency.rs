//! Display-only currency conversion.
//!
//! Balances are always stored in EUR. USD figures are derived on the way out
//! (and typed USD amounts converted back on the way in) using a fixed rate;
//! converted values are never written to an account.

use crate::constants::{DEFAULT_EXCHANGE_RATE, PRECISION};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Canonical unit
    #[default]
    Eur,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(format!("unsupported currency `{other}`")),
        }
    }
}

/// A display currency together with the fixed EUR -> USD rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyView {
    pub currency: Currency,
    pub exchange_rate: Decimal,
}

impl Default for CurrencyView {
    fn default() -> Self {
        Self {
            currency: Currency::Eur,
            exchange_rate: default_exchange_rate(),
        }
    }
}

impl CurrencyView {
    pub fn new(currency: Currency, exchange_rate: Decimal) -> Self {
        Self {
            currency,
            exchange_rate,
        }
    }

    pub fn to_display(&self, canonical: Decimal) -> Option<Decimal> {
        to_display(canonical, self.currency, self.exchange_rate)
    }

    pub fn to_canonical(&self, displayed: Decimal) -> Decimal {
        to_canonical(displayed, self.currency, self.exchange_rate)
    }

    pub fn format(&self, canonical: Decimal) -> String {
        format(canonical, self.currency, self.exchange_rate)
    }
}

pub fn default_exchange_rate() -> Decimal {
    Decimal::from_str(DEFAULT_EXCHANGE_RATE).unwrap_or(Decimal::ONE)
}

/// Parses a EUR -> USD rate, which must be strictly positive
pub fn parse_exchange_rate(raw: &str) -> Result<Decimal, String> {
    let rate = Decimal::from_str(raw.trim())
        .map_err(|e| format!("invalid exchange rate `{raw}`: {e}"))?;
    if rate <= Decimal::ZERO {
        return Err(format!("exchange rate must be positive, got `{raw}`"));
    }
    Ok(rate)
}

/// `None` when the converted figure does not fit a `Decimal`
pub fn to_display(canonical: Decimal, currency: Currency, exchange_rate: Decimal) -> Option<Decimal> {
    match currency {
        Currency::Eur => Some(canonical),
        Currency::Usd => canonical.checked_mul(exchange_rate),
    }
}

/// Inverse of `to_display`. A zero rate leaves the amount untouched.
pub fn to_canonical(displayed: Decimal, currency: Currency, exchange_rate: Decimal) -> Decimal {
    match currency {
        Currency::Eur => displayed,
        Currency::Usd => displayed.checked_div(exchange_rate).unwrap_or(displayed),
    }
}

/// Formats a canonical amount in `currency`.
/// EUR: `12.345,67 €` (es-ES), USD: `$12,345.67` (en-US).
/// A figure too large to convert is shown in EUR instead.
pub fn format(canonical: Decimal, currency: Currency, exchange_rate: Decimal) -> String {
    match to_display(canonical, currency, exchange_rate) {
        Some(shown) => render(shown, currency),
        None => {
            tracing::debug!(%canonical, %currency, "display conversion overflowed");
            render(canonical, Currency::Eur)
        }
    }
}

fn render(shown: Decimal, currency: Currency) -> String {
    let shown = shown.round_dp_with_strategy(PRECISION, RoundingStrategy::MidpointAwayFromZero);
    let sign = if shown.is_sign_negative() && !shown.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.*}", PRECISION as usize, shown.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    match currency {
        Currency::Eur => {
            // es-ES leaves four digit amounts ungrouped
            let int_part = if int_part.len() > 4 {
                group_thousands(int_part, '.')
            } else {
                int_part.to_string()
            };
            format!("{sign}{int_part},{frac_part} €")
        }
        Currency::Usd => {
            let int_part = group_thousands(int_part, ',');
            format!("{sign}${int_part}.{frac_part}")
        }
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
