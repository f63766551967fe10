/// Decimal places kept on every amount and printed in reports
pub const PRECISION: u32 = 2;

/// Fixed EUR -> USD rate used for display only
pub const DEFAULT_EXCHANGE_RATE: &str = "1.08";

/// Generator gives up after this many collisions in a row
pub const DEFAULT_CARD_NUMBER_ATTEMPTS: u32 = 1000;

/// `NNNN-NNNN-NNNN-NNNN`
pub const CARD_NUMBER_PATTERN: &str = r"^\d{4}-\d{4}-\d{4}-\d{4}$";
