use thiserror::Error;

/// Every way a bank command can be rejected.
/// A command that returns one of these has not changed any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    // identity
    #[error("user name is already taken")]
    DuplicateName,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("name and password are required")]
    MissingCredentials,
    #[error("no user is logged in")]
    NotLoggedIn,

    // ledger
    #[error("amount must be a positive finite number")]
    InvalidAmount,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("balance would exceed the representable range")]
    BalanceOverflow,

    // contacts & lookup
    #[error("card number is already in contacts")]
    DuplicateContact,
    #[error("cannot add own card as a contact")]
    SelfContact,
    #[error("card number must look like NNNN-NNNN-NNNN-NNNN")]
    InvalidFormat,
    #[error("no account matches")]
    NotFound,

    // transfer preconditions
    #[error("cannot transfer to own card")]
    SelfTransfer,
    #[error("recipient not found")]
    RecipientNotFound,

    #[error("unknown card style `{0}`")]
    UnknownCardStyle(String),

    #[error("no operation is awaiting confirmation")]
    NothingStaged,

    #[error("could not allocate a unique card number")]
    GenerationExhausted,
}
