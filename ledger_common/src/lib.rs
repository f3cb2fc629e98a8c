pub mod accounts;
pub mod amount;
pub mod cli;
pub mod errors;
pub mod ledger;
pub mod requests;
pub mod responses;
pub mod validation;

pub use accounts::Account;
pub use ledger::Ledger;
pub use rust_decimal::Decimal;
pub use requests::*;
pub use responses::*;
