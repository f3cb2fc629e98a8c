use crate::amount::{self, parse_amount};
use crate::errors::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// **An account record**
///
/// The `id` is the sole lookup key and never changes; the `name` is only a display label.
///
/// The balance is private: it can only be changed by a transfer inside this crate.
/// On the wire, it is a string with exactly two decimals, e.g. `"70.00"`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(
        serialize_with = "amount::serialize_balance",
        deserialize_with = "amount::deserialize_balance"
    )]
    balance: Decimal,
}

impl Account {
    /// Creates an account with its balance rounded to two decimals.
    ///
    /// # Errors
    /// - Negative balance, `LedgerError::InvalidAmount`
    pub fn new(id: &str, name: &str, balance: Decimal) -> Result<Self, LedgerError> {
        let balance = amount::normalize_checked(balance)
            .filter(|balance| *balance >= Decimal::ZERO)
            .ok_or_else(|| LedgerError::InvalidAmount(balance.to_string()))?;

        Ok(Account {
            id: id.to_string(),
            name: name.to_string(),
            balance,
        })
    }

    /// The current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// **A type for managing accounts and their current balance**
///
/// Keeps the accounts in their bootstrap order and maps each account ID to its position.
///
/// This type does no locking of its own; see [`crate::ledger::Ledger`].
#[derive(Debug)]
pub struct Accounts {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
}

impl Accounts {
    /// Takes ownership of the records.
    ///
    /// The total of all balances must be representable, so that no transfer can overflow.
    ///
    /// # Errors
    /// - Two records share an ID, `LedgerError::DuplicateAccount`;
    /// - The total of all balances is out of range, `LedgerError::InvalidAmount`.
    pub fn new(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        accounts
            .iter()
            .try_fold(Decimal::ZERO, |total, account| {
                total.checked_add(account.balance)
            })
            .filter(|total| total.scale() == amount::SCALE)
            .ok_or_else(|| {
                LedgerError::InvalidAmount("the total of all balances is out of range".to_string())
            })?;

        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            if index.insert(account.id.clone(), position).is_some() {
                return Err(LedgerError::DuplicateAccount(account.id.clone()));
            }
        }

        Ok(Accounts { accounts, index })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts, in bootstrap order
    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    /// Looks up an account by its ID.
    ///
    /// # Errors
    /// - Account doesn't exist, `LedgerError::UnknownAccount`
    pub fn get(&self, id: &str) -> Result<&Account, LedgerError> {
        self.position(id).map(|position| &self.accounts[position])
    }

    /// Retrieves the balance of an account.
    ///
    /// # Errors
    /// - Account doesn't exist, `LedgerError::UnknownAccount`
    pub fn balance_of(&self, id: &str) -> Result<Decimal, LedgerError> {
        self.get(id).map(Account::balance)
    }

    /// The sum of all balances
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(Account::balance).sum()
    }

    fn position(&self, id: &str) -> Result<usize, LedgerError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LedgerError::UnknownAccount(id.to_string()))
    }

    /// **Moves `amount` from the `from` account to the `to` account**
    ///
    /// The checks are done in this order, and the first one to fail decides the error:
    /// 1. the sender exists, then the recipient exists;
    /// 2. the amount parses as a positive decimal;
    /// 3. the sender's balance covers the amount.
    ///
    /// Nothing is modified before all the checks pass, so a failed transfer leaves
    /// every balance as it was.
    ///
    /// A transfer to the same account is a successful no-op.
    ///
    /// # Errors
    /// - Any of the two accounts doesn't exist, `LedgerError::UnknownAccount`;
    /// - Amount isn't a positive number, `LedgerError::InvalidAmount`;
    /// - Sender's account under-funded, `LedgerError::InsufficientFunds`.
    pub fn transfer(&mut self, from: &str, to: &str, amount: &str) -> Result<(), LedgerError> {
        let sender = self.position(from)?;
        let recipient = self.position(to)?;

        let amount = parse_amount(amount)?;

        let available = self.accounts[sender].balance;
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                account: from.to_string(),
                requested: amount,
                available,
            });
        }

        if sender == recipient {
            return Ok(());
        }

        // Both operands have a scale of two, so the results are exact and stay at that scale.
        self.accounts[sender].balance = available - amount;
        self.accounts[recipient].balance += amount;

        Ok(())
    }
}
