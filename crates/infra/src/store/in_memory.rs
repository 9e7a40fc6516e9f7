use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tally_core::{AccountId, IdGenerator, LedgerError, LedgerResult, TransactionId};
use tally_ledger::{Account, Entry, LedgerState, Transaction, TransactionHeader, ValidatedEntries};

use super::LedgerStore;

/// In-memory ledger store.
///
/// One `RwLock` guards the whole [`LedgerState`]. Posting holds the write
/// lock across resolve and commit; reads share the read lock. Nothing
/// survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<LedgerState>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|_| LedgerError::storage("lock poisoned"))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|_| LedgerError::storage("lock poisoned"))
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn account(&self, id: &AccountId) -> LedgerResult<Option<Account>> {
        Ok(self.read()?.account(id).cloned())
    }

    fn accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.read()?.accounts())
    }

    fn insert_account(&self, account: Account) -> LedgerResult<Account> {
        self.write()?.insert_account(account.clone())?;
        Ok(account)
    }

    fn post(
        &self,
        entries: &ValidatedEntries,
        header: TransactionHeader,
        ids: &dyn IdGenerator,
    ) -> LedgerResult<Transaction> {
        let mut state = self.write()?;
        state.post(entries, header, ids)
    }

    fn transaction(&self, id: &TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self.read()?.transaction(id).cloned())
    }

    fn entries(&self) -> LedgerResult<Vec<Entry>> {
        Ok(self.read()?.entries().to_vec())
    }

    fn drift(&self) -> LedgerResult<Vec<AccountId>> {
        self.read()?.drift()
    }
}
