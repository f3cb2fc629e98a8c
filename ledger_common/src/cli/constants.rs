/// CLI Commands

pub const HELP: &str = "help";
pub const ACCOUNTS: &str = "accounts";
pub const ACCOUNT: &str = "account";
pub const TRANSFER: &str = "transfer";
pub const QUIT: &str = "quit";

/// Various CLI constants

pub const PROMPT: &str = "> ";
