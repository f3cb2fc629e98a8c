//! Helper functions that are common to CLI apps

use crate::cli::constants::*;
use crate::errors::ACCOUNT_ID_NOT_VALID_MSG;
use crate::validation;
use std::io::{stdin, stdout, Write};

/// **Contains full variants of all existing commands.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_full() -> String {
    format!("{HELP} {ACCOUNTS} {ACCOUNT} {TRANSFER} {QUIT}")
}

/// **Contains short variants of all existing commands.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_short() -> String {
    "h a c t q".to_string()
}

/// **Prints all existing commands in their full and short variants.**
pub fn help() {
    println!("{}", help_contents_full());
    println!("{}", help_contents_short());
}

/// **Reads standard input into a line.**
///
/// Signals an empty line so we can ignore it (in the main loop).
/// End of input is reported as the `quit` command.
///
/// # Panics
/// Panics in case it can't write `label` to `stdout`,
/// or if it can't flush the `stdout` buffer.
pub fn read_from_stdin(label: &str) -> Option<String> {
    let mut lock = stdout().lock();
    write!(lock, "\n{label}").expect("Failed to write the label to stdout.");
    lock.flush().expect("Failed to flush the stdout buffer.");

    let mut line = String::new();
    match stdin().read_line(&mut line) {
        Ok(0) => Some(QUIT.to_string()),
        Ok(_) => {
            if line.trim().is_empty() {
                None
            } else {
                Some(line.to_owned())
            }
        }
        Err(err) => {
            eprintln!("[ERROR] Failed to read line: {}", err);
            None
        }
    }
}

/// **Basic input validation for an account ID**
///
/// Prints the reason if the ID isn't valid.
pub fn is_valid_id(id: &str) -> bool {
    match validation::is_valid_id(id) {
        Some(msg) => {
            eprintln!("{}: \"{}\". {}", ACCOUNT_ID_NOT_VALID_MSG, id, msg);
            false
        }
        None => true,
    }
}

/// Prints an error message about not being able to parse
/// a string into an amount, so that our users can get a
/// more informative message than the generic one.
pub fn cannot_parse_amount(word: &str) {
    eprintln!(
        "[ERROR] Only positive decimal numbers are allowed as the amount; you provided '{}'.",
        word
    );
}

#[cfg(test)]
mod tests {
    use super::{help_contents_full, help_contents_short, is_valid_id};

    #[test]
    fn test_help_contents() {
        let expected = "help accounts account transfer quit".to_string();
        assert_eq!(help_contents_full(), expected);
    }

    #[test]
    fn test_help_contents_short() {
        let expected = "h a c t q".to_string();
        assert_eq!(help_contents_short(), expected);
    }

    #[test]
    fn test_valid_id_passes() {
        assert!(is_valid_id("A"));
    }

    #[test]
    fn test_empty_id_fails() {
        assert!(!is_valid_id(""));
    }
}
