//! Constants and helper functions for CLI apps that talk to the ledger

pub mod constants;
pub mod helpers;
