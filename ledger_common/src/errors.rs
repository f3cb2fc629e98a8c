use rust_decimal::Decimal;
use thiserror::Error;

/// **An application-specific error type**
///
/// Every failure a ledger operation or a request can end in.
/// The first four variants are caused by the caller's input or by the current state
/// of the ledger, and are never retried.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// The request payload doesn't have the expected shape.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The account ID doesn't resolve to an existing account.
    #[error("Account not found: \"{0}\"")]
    UnknownAccount(String),

    /// The amount is not a number, or it is zero or negative.
    #[error("Invalid amount: \"{0}\"")]
    InvalidAmount(String),

    /// The amount exceeds the source account's balance.
    #[error("Insufficient funds in account \"{account}\": requested {requested}, available {available}")]
    InsufficientFunds {
        account: String,
        requested: Decimal,
        available: Decimal,
    },

    /// Two bootstrap records share the same ID.
    #[error("Duplicate account ID: \"{0}\"")]
    DuplicateAccount(String),

    /// Serialization or an unexpected state failure.
    #[error("Internal fault: {0}")]
    Internal(String),
}

impl LedgerError {
    /// The stable, machine-readable name of the error kind,
    /// as it appears in the `error` field of error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::MalformedRequest(_) => "MalformedRequest",
            LedgerError::UnknownAccount(_) => "UnknownAccount",
            LedgerError::InvalidAmount(_) => "InvalidAmount",
            LedgerError::InsufficientFunds { .. } => "InsufficientFunds",
            LedgerError::DuplicateAccount(_) => "DuplicateAccount",
            LedgerError::Internal(_) => "InternalFault",
        }
    }

    /// Whether the error was caused by the caller rather than by the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, LedgerError::Internal(_))
    }
}

pub const ACCOUNT_ID_NOT_VALID_MSG: &str = "[ERROR] Account ID is not valid";
pub const EMPTY_ACCOUNT_ID: &str = "Account ID cannot be empty.";
pub const LOCK_POISONED_MSG: &str = "the ledger lock is poisoned";
