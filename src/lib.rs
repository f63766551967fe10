//! In-memory prepaid card bank: accounts, a ledger with deposits, withdrawals
//! and transfers, contacts, notifications, and a stage-then-confirm workflow
//! that guards every balance change.

pub mod account;
pub mod bank;
pub mod card_number;
pub mod cli_io;
pub mod config;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod logging;
pub mod shared;
pub mod transaction;
pub mod workflow;


pub use account::{Account, AccountId, CardStyle, Contact, Notification};
pub use bank::{Bank, SessionSummary};
pub use config::BankConfig;
pub use currency::{Currency, CurrencyView};
pub use errors::BankError;
pub use shared::SharedBank;
pub use transaction::{Transaction, TxnKind};
pub use workflow::{ConfirmationWorkflow, OperationKind, Receipt, WorkflowState};
