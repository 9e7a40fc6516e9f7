//! Application service: account management and the transaction pipeline.
//!
//! ```text
//! NewTransaction
//!   ↓
//! 1. Validate entries (pure; no store access)
//!   ↓
//! 2. Store::post — resolve accounts + commit, atomically
//!   ↓
//! Transaction (with generated entry ids)
//! ```
//!
//! The service owns no state of its own beyond the injected store and id
//! generator, so it is cheap to share behind an `Arc`.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use tally_core::{
    AccountId, IdGenerator, LedgerError, LedgerResult, TransactionId, UuidV7Generator,
};
use tally_ledger::{Account, CandidateEntry, Direction, Transaction, TransactionHeader, validate_entries};

use crate::store::{InMemoryLedgerStore, LedgerStore};

/// Input for account creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    /// Generated when absent or empty.
    pub id: Option<String>,
    pub name: Option<String>,
    /// Must be exactly `"debit"` or `"credit"`.
    pub direction: Option<String>,
    /// Defaults to zero.
    pub balance: Option<Decimal>,
}

/// Input for transaction creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTransaction {
    /// Generated when absent or empty.
    pub id: Option<String>,
    pub name: Option<String>,
    pub entries: Option<Vec<CandidateEntry>>,
}

pub struct LedgerService<S = InMemoryLedgerStore> {
    store: S,
    ids: Arc<dyn IdGenerator>,
}

impl LedgerService<InMemoryLedgerStore> {
    /// In-memory store with UUIDv7 ids.
    pub fn in_memory() -> Self {
        Self::new(InMemoryLedgerStore::new(), Arc::new(UuidV7Generator))
    }
}

impl<S> LedgerService<S>
where
    S: LedgerStore,
{
    pub fn new(store: S, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_account(&self, req: NewAccount) -> LedgerResult<Account> {
        let direction: Direction = req
            .direction
            .as_deref()
            .ok_or(LedgerError::InvalidDirection)?
            .parse()
            .inspect_err(|_| warn!(direction = ?req.direction, "rejected account direction"))?;

        let id = match non_empty(req.id) {
            Some(id) => AccountId::new(id),
            None => AccountId::generate(self.ids.as_ref()),
        };

        let account = Account::new(id, req.name, direction, req.balance.unwrap_or(Decimal::ZERO));
        let account = self.store.insert_account(account)?;

        info!(
            account_id = %account.id,
            direction = %account.direction,
            balance = %account.balance,
            "account created"
        );
        Ok(account)
    }

    pub fn get_account(&self, id: &str) -> LedgerResult<Account> {
        self.store
            .account(&AccountId::new(id))?
            .ok_or(LedgerError::NotFound)
    }

    pub fn create_transaction(&self, req: NewTransaction) -> LedgerResult<Transaction> {
        let entries = validate_entries(req.entries.as_deref()).inspect_err(|e| {
            debug!(error = %e, "transaction rejected by validation");
        })?;

        let mut header = TransactionHeader::new(Utc::now());
        header.id = non_empty(req.id).map(TransactionId::new);
        header.name = req.name;

        let transaction = self
            .store
            .post(&entries, header, self.ids.as_ref())
            .inspect_err(|e| warn!(error = %e, "transaction not posted"))?;

        info!(
            transaction_id = %transaction.id,
            amount = %entries.amount(),
            entries = transaction.entries.len(),
            "transaction posted"
        );
        Ok(transaction)
    }

    pub fn get_transaction(&self, id: &str) -> LedgerResult<Transaction> {
        let id = TransactionId::new(id);
        self.store
            .transaction(&id)?
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    /// Replay the entry log and report accounts whose cached balance drifted.
    pub fn verify_balances(&self) -> LedgerResult<Vec<AccountId>> {
        let drifted = self.store.drift()?;
        if !drifted.is_empty() {
            warn!(accounts = ?drifted, "balance cache disagrees with entry log");
        }
        Ok(drifted)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use tally_core::{EntryId, SequentialIdGenerator};

    use super::*;

    fn service() -> LedgerService {
        LedgerService::new(InMemoryLedgerStore::new(), Arc::new(SequentialIdGenerator::new("id")))
    }

    fn account(service: &LedgerService, name: &str, direction: &str) -> Account {
        service
            .create_account(NewAccount {
                name: Some(name.to_string()),
                direction: Some(direction.to_string()),
                ..NewAccount::default()
            })
            .unwrap()
    }

    fn entries(legs: &[(&str, &str, Decimal)]) -> Option<Vec<CandidateEntry>> {
        Some(
            legs.iter()
                .map(|(a, d, amt)| CandidateEntry::new(*a, *d, *amt))
                .collect(),
        )
    }

    #[test]
    fn creates_account_with_defaults() {
        let service = service();
        let cash = account(&service, "Cash", "debit");

        assert_eq!(cash.id, AccountId::new("id-1"));
        assert_eq!(cash.name.as_deref(), Some("Cash"));
        assert_eq!(cash.direction, Direction::Debit);
        assert_eq!(cash.balance, Decimal::ZERO);
        assert_eq!(service.get_account("id-1").unwrap(), cash);
    }

    #[test]
    fn creates_account_with_supplied_id_and_balance() {
        let service = service();
        let acct = service
            .create_account(NewAccount {
                id: Some("custom-id".into()),
                name: Some("Test Account".into()),
                direction: Some("debit".into()),
                balance: Some(dec!(1000)),
            })
            .unwrap();

        assert_eq!(acct.id, AccountId::new("custom-id"));
        assert_eq!(acct.balance, dec!(1000));
    }

    #[test]
    fn empty_id_is_generated() {
        let service = service();
        let acct = service
            .create_account(NewAccount {
                id: Some(String::new()),
                direction: Some("credit".into()),
                ..NewAccount::default()
            })
            .unwrap();
        assert_eq!(acct.id, AccountId::new("id-1"));
    }

    #[test]
    fn rejects_invalid_or_missing_direction() {
        let service = service();
        for direction in [Some("invalid".to_string()), None] {
            let err = service
                .create_account(NewAccount {
                    direction,
                    ..NewAccount::default()
                })
                .unwrap_err();
            assert_eq!(err, LedgerError::InvalidDirection);
        }
        assert!(service.store().accounts().unwrap().is_empty());
    }

    #[test]
    fn rejects_duplicate_account_id() {
        let service = service();
        let req = NewAccount {
            id: Some("cash".into()),
            direction: Some("debit".into()),
            ..NewAccount::default()
        };
        service.create_account(req.clone()).unwrap();
        assert_eq!(
            service.create_account(req),
            Err(LedgerError::DuplicateAccount(AccountId::new("cash")))
        );
    }

    #[test]
    fn unknown_account_is_not_found() {
        assert_eq!(service().get_account("unknown"), Err(LedgerError::NotFound));
    }

    #[test]
    fn sale_then_rejections_keep_balances_consistent() {
        let service = service();
        let cash = account(&service, "Cash", "debit");
        let revenue = account(&service, "Revenue", "credit");

        let tx = service
            .create_transaction(NewTransaction {
                name: Some("Sale".into()),
                entries: entries(&[
                    (cash.id.as_str(), "debit", dec!(100)),
                    (revenue.id.as_str(), "credit", dec!(100)),
                ]),
                ..NewTransaction::default()
            })
            .unwrap();

        assert_eq!(tx.id, TransactionId::new("id-3"));
        assert_eq!(tx.entries[0].id, EntryId::new("id-4"));
        assert_eq!(service.get_account(cash.id.as_str()).unwrap().balance, dec!(100));
        assert_eq!(service.get_account(revenue.id.as_str()).unwrap().balance, dec!(100));
        assert_eq!(service.get_transaction("id-3").unwrap(), tx);

        let unbalanced = service.create_transaction(NewTransaction {
            entries: entries(&[
                (cash.id.as_str(), "debit", dec!(60)),
                (revenue.id.as_str(), "credit", dec!(50)),
            ]),
            ..NewTransaction::default()
        });
        assert_eq!(unbalanced, Err(LedgerError::AmountMismatch));

        let ghost = service.create_transaction(NewTransaction {
            entries: entries(&[("ghost", "debit", dec!(10)), (revenue.id.as_str(), "credit", dec!(10))]),
            ..NewTransaction::default()
        });
        assert_eq!(ghost, Err(LedgerError::AccountNotFound(AccountId::new("ghost"))));

        assert_eq!(service.get_account(cash.id.as_str()).unwrap().balance, dec!(100));
        assert_eq!(service.get_account(revenue.id.as_str()).unwrap().balance, dec!(100));
        assert_eq!(service.store().entries().unwrap().len(), 2);
        assert!(service.verify_balances().unwrap().is_empty());
    }

    #[test]
    fn missing_entries_are_invalid() {
        let service = service();
        assert_eq!(
            service.create_transaction(NewTransaction::default()),
            Err(LedgerError::InvalidEntries)
        );
    }

    #[test]
    fn unknown_transaction_is_not_found() {
        assert_eq!(
            service().get_transaction("nope"),
            Err(LedgerError::TransactionNotFound(TransactionId::new("nope")))
        );
    }
}
