use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};

pub const TRANSFER_SUCCESSFUL_MSG: &str = "Transfer successful";

/// The body of a successful transfer response
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TransferResponse {
    pub message: String,
}

impl TransferResponse {
    pub fn successful() -> Self {
        TransferResponse {
            message: TRANSFER_SUCCESSFUL_MSG.to_string(),
        }
    }
}

/// **The body of every error response**
///
/// `error` is the machine-readable kind, `message` the human-readable cause.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<&LedgerError> for ErrorResponse {
    fn from(err: &LedgerError) -> Self {
        ErrorResponse::new(err.kind(), &err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_from_ledger_error() {
        let response = ErrorResponse::from(&LedgerError::UnknownAccount("Z".to_string()));
        assert_eq!("UnknownAccount", response.error);
        assert_eq!("Account not found: \"Z\"", response.message);
    }
}
