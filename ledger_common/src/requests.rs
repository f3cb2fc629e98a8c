use serde::{Deserialize, Serialize};

/// **A request to move funds between two accounts**
///
/// The amount stays a string until the ledger parses it,
/// so that it is never handled as a binary floating-point number.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
}
