//! Ledger storage abstraction.
//!
//! The store is the single owner of accounts, transactions and entries. The
//! one hard requirement on implementations is that [`LedgerStore::post`] is
//! atomic: concurrent readers see either none or all of a transaction.

use std::sync::Arc;

use tally_core::{AccountId, IdGenerator, LedgerResult, TransactionId};
use tally_ledger::{Account, Entry, Transaction, TransactionHeader, ValidatedEntries};

mod in_memory;

pub use in_memory::InMemoryLedgerStore;

pub trait LedgerStore: Send + Sync {
    /// Look up one account by id.
    fn account(&self, id: &AccountId) -> LedgerResult<Option<Account>>;

    /// Snapshot of every account, sorted by id.
    fn accounts(&self) -> LedgerResult<Vec<Account>>;

    /// Insert a new account; duplicate ids are rejected.
    fn insert_account(&self, account: Account) -> LedgerResult<Account>;

    /// Resolve and commit one validated transaction as a single atomic unit.
    fn post(
        &self,
        entries: &ValidatedEntries,
        header: TransactionHeader,
        ids: &dyn IdGenerator,
    ) -> LedgerResult<Transaction>;

    fn transaction(&self, id: &TransactionId) -> LedgerResult<Option<Transaction>>;

    /// The entry log in commit order.
    fn entries(&self) -> LedgerResult<Vec<Entry>>;

    /// Accounts whose cached balance disagrees with a replay of the entry log.
    fn drift(&self) -> LedgerResult<Vec<AccountId>>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn account(&self, id: &AccountId) -> LedgerResult<Option<Account>> {
        (**self).account(id)
    }

    fn accounts(&self) -> LedgerResult<Vec<Account>> {
        (**self).accounts()
    }

    fn insert_account(&self, account: Account) -> LedgerResult<Account> {
        (**self).insert_account(account)
    }

    fn post(
        &self,
        entries: &ValidatedEntries,
        header: TransactionHeader,
        ids: &dyn IdGenerator,
    ) -> LedgerResult<Transaction> {
        (**self).post(entries, header, ids)
    }

    fn transaction(&self, id: &TransactionId) -> LedgerResult<Option<Transaction>> {
        (**self).transaction(id)
    }

    fn entries(&self) -> LedgerResult<Vec<Entry>> {
        (**self).entries()
    }

    fn drift(&self) -> LedgerResult<Vec<AccountId>> {
        (**self).drift()
    }
}
