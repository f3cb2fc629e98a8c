//! The ledger: the sole owner of all accounts, and the sole mutation path for balances

use crate::accounts::{Account, Accounts};
use crate::errors::{LedgerError, LOCK_POISONED_MSG};
use rust_decimal::Decimal;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// **Holds the authoritative account state**
///
/// A single readers-writer lock guards the whole collection of accounts.
/// Reads take the shared lock, and a transfer takes the exclusive lock for the full
/// duration of its validate-then-mutate sequence, so no reader ever observes
/// a transfer that is only half applied.
///
/// This is coarse-grained locking: transfers between disjoint accounts are serialized, too.
/// Scaling it up would mean per-account locks, always acquired in ascending ID order.
///
/// The lock is a blocking one; it must never be held across an `.await`.
/// None of the methods here are `async`, which guarantees that.
#[derive(Debug)]
pub struct Ledger {
    accounts: RwLock<Accounts>,
}

impl Ledger {
    /// **Creates the ledger from the bootstrap records**
    ///
    /// # Errors
    /// - Two records share an ID, `LedgerError::DuplicateAccount`
    pub fn new(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        Ok(Ledger {
            accounts: RwLock::new(Accounts::new(accounts)?),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Accounts>, LedgerError> {
        self.accounts.read().map_err(|_| {
            log::error!("{}", LOCK_POISONED_MSG);
            LedgerError::Internal(LOCK_POISONED_MSG.to_string())
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Accounts>, LedgerError> {
        self.accounts.write().map_err(|_| {
            log::error!("{}", LOCK_POISONED_MSG);
            LedgerError::Internal(LOCK_POISONED_MSG.to_string())
        })
    }

    /// Poisons the lock by panicking in a thread that holds it for writing.
    ///
    /// Every later operation fails with `LedgerError::Internal`.
    #[cfg(any(test, feature = "testing"))]
    pub fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.accounts.write();
                    panic!("poisoning the ledger lock");
                })
                .join();
        });
    }

    /// **A consistent copy of all accounts, in bootstrap order**
    ///
    /// # Errors
    /// - Only if a writer panicked while holding the lock, `LedgerError::Internal`
    pub fn snapshot(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.read()?.all().to_vec())
    }

    /// **A single account**
    ///
    /// # Errors
    /// - Account doesn't exist, `LedgerError::UnknownAccount`
    pub fn account(&self, id: &str) -> Result<Account, LedgerError> {
        self.read()?.get(id).cloned()
    }

    /// **Retrieves the balance of an account**
    ///
    /// # Errors
    /// - Account doesn't exist, `LedgerError::UnknownAccount`
    pub fn balance_of(&self, id: &str) -> Result<Decimal, LedgerError> {
        self.read()?.balance_of(id)
    }

    /// The sum of all balances, taken at one instant
    pub fn total_balance(&self) -> Result<Decimal, LedgerError> {
        Ok(self.read()?.total_balance())
    }

    /// The number of accounts, which never changes
    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.read()?.is_empty())
    }

    /// **Transfers `amount` from one account to another, atomically**
    ///
    /// See [`Accounts::transfer`] for the order of the checks.
    ///
    /// # Errors
    /// - Any of the two accounts doesn't exist, `LedgerError::UnknownAccount`;
    /// - Amount isn't a positive number, `LedgerError::InvalidAmount`;
    /// - Sender's account under-funded, `LedgerError::InsufficientFunds`;
    /// - Poisoned lock, `LedgerError::Internal`.
    pub fn transfer(&self, from: &str, to: &str, amount: &str) -> Result<(), LedgerError> {
        self.write()?.transfer(from, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::sync::Arc;
    use std::thread;

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    fn alice_and_bob() -> Ledger {
        Ledger::new(vec![
            Account::new("A", "Alice", dec("100.00")).unwrap(),
            Account::new("B", "Bob", dec("50.00")).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn transfer_scenario() {
        let ledger = alice_and_bob();

        assert_eq!(Ok(()), ledger.transfer("A", "B", "30.00"));

        assert_eq!(Ok(dec("70.00")), ledger.balance_of("A"));
        assert_eq!(Ok(dec("80.00")), ledger.balance_of("B"));
    }

    #[test]
    fn insufficient_funds_scenario() {
        let ledger = alice_and_bob();
        let before = ledger.snapshot().unwrap();

        assert!(matches!(
            ledger.transfer("A", "B", "150.00"),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(before, ledger.snapshot().unwrap());
    }

    #[test]
    fn unknown_account_scenario() {
        let ledger = alice_and_bob();
        let before = ledger.snapshot().unwrap();

        assert_eq!(
            Err(LedgerError::UnknownAccount("Z".to_string())),
            ledger.transfer("A", "Z", "10.00")
        );
        assert_eq!(before, ledger.snapshot().unwrap());
    }

    #[test]
    fn snapshot_keeps_bootstrap_order_and_is_idempotent() {
        let ledger = alice_and_bob();

        let first = ledger.snapshot().unwrap();
        let second = ledger.snapshot().unwrap();

        assert_eq!(first, second);
        assert_eq!(
            vec!["A", "B"],
            first.iter().map(|a| a.id.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(Ok(2), ledger.len());
        assert_eq!(Ok(false), ledger.is_empty());
    }

    #[test]
    fn account_lookup() {
        let ledger = alice_and_bob();

        assert_eq!("Bob", ledger.account("B").unwrap().name);
        assert_eq!(
            Err(LedgerError::UnknownAccount("C".to_string())),
            ledger.account("C")
        );
    }

    #[test]
    fn successful_transfers_conserve_the_total() {
        let ledger = alice_and_bob();
        let total = ledger.total_balance().unwrap();

        ledger.transfer("A", "B", "12.34").unwrap();
        ledger.transfer("B", "A", "0.01").unwrap();
        let _ = ledger.transfer("B", "A", "1000");

        assert_eq!(Ok(total), ledger.total_balance());
    }

    #[test]
    fn concurrent_transfers_are_linearizable() {
        let ledger = Arc::new(alice_and_bob());

        // 100 transfers of 1.00 from A to B and 50 of 1.00 from B to A, in parallel.
        // A has enough for all of its transfers regardless of ordering, so all succeed.
        thread::scope(|scope| {
            for i in 0..150 {
                let ledger = Arc::clone(&ledger);
                scope.spawn(move || {
                    let (from, to) = if i % 3 == 2 { ("B", "A") } else { ("A", "B") };
                    ledger.transfer(from, to, "1.00")
                });
            }
        });

        assert_eq!(Ok(dec("50.00")), ledger.balance_of("A"));
        assert_eq!(Ok(dec("100.00")), ledger.balance_of("B"));
        assert_eq!(Ok(dec("150.00")), ledger.total_balance());
    }

    #[test]
    fn concurrent_overdraft_attempts_succeed_exactly_as_often_as_funds_allow() {
        let ledger = Arc::new(alice_and_bob());

        let successes: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..40)
                .map(|_| {
                    let ledger = Arc::clone(&ledger);
                    scope.spawn(move || ledger.transfer("A", "B", "7.00").is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap() as usize)
                .sum()
        });

        // 100.00 / 7.00 = 14 whole transfers
        assert_eq!(14, successes);
        assert_eq!(Ok(dec("2.00")), ledger.balance_of("A"));
        assert_eq!(Ok(dec("148.00")), ledger.balance_of("B"));
    }

    #[test]
    fn readers_never_see_a_half_applied_transfer() {
        let ledger = Arc::new(alice_and_bob());
        let total = ledger.total_balance().unwrap();

        thread::scope(|scope| {
            let writer = Arc::clone(&ledger);
            scope.spawn(move || {
                for _ in 0..500 {
                    let _ = writer.transfer("A", "B", "0.10");
                    let _ = writer.transfer("B", "A", "0.05");
                }
            });

            let reader = Arc::clone(&ledger);
            scope.spawn(move || {
                for _ in 0..500 {
                    let sum: Decimal = reader
                        .snapshot()
                        .unwrap()
                        .iter()
                        .map(Account::balance)
                        .sum();
                    assert_eq!(total, sum);
                }
            });
        });
    }

    #[test]
    fn poisoned_lock_is_an_internal_fault() {
        let ledger = alice_and_bob();
        ledger.poison();

        assert_eq!(
            Err(LedgerError::Internal(LOCK_POISONED_MSG.to_string())),
            ledger.transfer("A", "B", "1.00")
        );
        assert!(ledger.snapshot().is_err());
    }
}
