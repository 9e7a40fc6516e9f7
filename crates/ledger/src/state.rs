use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use tally_core::{AccountId, Entity, IdGenerator, LedgerError, LedgerResult, TransactionId};

use crate::account::Account;
use crate::applier::{self, AccountLookup, Posting};
use crate::entry::Entry;
use crate::replay::{self, Opening};
use crate::transaction::{Transaction, TransactionHeader};
use crate::validator::ValidatedEntries;

/// The authoritative ledger collections: accounts, transactions, entries.
///
/// Not synchronised. Callers that share it across threads wrap it in a lock
/// and run [`LedgerState::post`] under exclusive access.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    accounts: HashMap<AccountId, Account>,
    openings: HashMap<AccountId, Opening>,
    transactions: HashMap<TransactionId, Transaction>,
    /// Append-only, in commit order.
    entries: Vec<Entry>,
}

impl AccountLookup for LedgerState {
    fn lookup(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// All accounts, sorted by id.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<_> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Insert a new account. Its current balance is recorded as the opening
    /// balance for replay.
    pub fn insert_account(&mut self, account: Account) -> LedgerResult<()> {
        let id = account.id().clone();
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::DuplicateAccount(id));
        }
        self.openings.insert(
            id.clone(),
            Opening {
                direction: account.direction,
                balance: account.balance,
            },
        );
        self.accounts.insert(id, account);
        Ok(())
    }

    /// Resolve and commit one transaction.
    ///
    /// On error the state is untouched.
    pub fn post(
        &mut self,
        entries: &ValidatedEntries,
        header: TransactionHeader,
        ids: &dyn IdGenerator,
    ) -> LedgerResult<Transaction> {
        let posting = applier::resolve(entries, header, &*self, ids)?;
        Ok(self.commit(posting))
    }

    /// Apply a posting resolved against this state.
    fn commit(&mut self, posting: Posting) -> Transaction {
        let (transaction, deltas) = posting.into_parts();

        for (account_id, delta) in deltas {
            if let Some(account) = self.accounts.get_mut(&account_id) {
                account.apply_delta(delta);
            }
        }

        self.entries.extend(transaction.entries.iter().cloned());
        // Duplicate transaction ids: last write wins.
        self.transactions
            .insert(transaction.id().clone(), transaction.clone());

        transaction
    }

    /// Balances recomputed from openings and the entry log.
    pub fn replayed_balances(&self) -> LedgerResult<BTreeMap<AccountId, Decimal>> {
        replay::replay_balances(&self.openings, &self.entries)
    }

    /// Accounts whose cached balance disagrees with the replayed one.
    pub fn drift(&self) -> LedgerResult<Vec<AccountId>> {
        let replayed = self.replayed_balances()?;
        let mut drifted: Vec<AccountId> = self
            .accounts
            .values()
            .filter(|a| replayed.get(&a.id) != Some(&a.balance))
            .map(|a| a.id.clone())
            .collect();
        drifted.sort();
        Ok(drifted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use tally_core::SequentialIdGenerator;

    use super::*;
    use crate::account::Direction;
    use crate::entry::CandidateEntry;
    use crate::validator::validate_entries;

    fn ledger() -> LedgerState {
        let mut state = LedgerState::new();
        state
            .insert_account(Account::new(AccountId::new("cash"), Some("Cash".into()), Direction::Debit, Decimal::ZERO))
            .unwrap();
        state
            .insert_account(Account::new(
                AccountId::new("revenue"),
                Some("Revenue".into()),
                Direction::Credit,
                Decimal::ZERO,
            ))
            .unwrap();
        state
    }

    fn validated(debit: &str, credit: &str, amount: Decimal) -> ValidatedEntries {
        let entries = vec![
            CandidateEntry::new(debit, "debit", amount),
            CandidateEntry::new(credit, "credit", amount),
        ];
        validate_entries(Some(entries.as_slice())).unwrap()
    }

    fn balance(state: &LedgerState, id: &str) -> Decimal {
        state.account(&AccountId::new(id)).unwrap().balance
    }

    #[test]
    fn posting_updates_both_balances() {
        let mut state = ledger();
        let ids = SequentialIdGenerator::new("id");

        let tx = state
            .post(&validated("cash", "revenue", dec!(100)), TransactionHeader::new(Utc::now()), &ids)
            .unwrap();

        assert_eq!(balance(&state, "cash"), dec!(100));
        assert_eq!(balance(&state, "revenue"), dec!(100));
        assert_eq!(state.entries().len(), 2);
        assert_eq!(state.transaction(&tx.id), Some(&tx));
    }

    #[test]
    fn failed_resolution_leaves_state_untouched() {
        let mut state = ledger();
        let ids = SequentialIdGenerator::new("id");
        let before = state.accounts();

        // Valid first leg, unknown second leg.
        let err = state
            .post(&validated("cash", "ghost", dec!(10)), TransactionHeader::new(Utc::now()), &ids)
            .unwrap_err();

        assert_eq!(err, LedgerError::AccountNotFound(AccountId::new("ghost")));
        assert_eq!(state.accounts(), before);
        assert!(state.entries().is_empty());
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn overflowing_post_is_rejected_and_state_stays_usable() {
        let mut state = ledger();
        state
            .insert_account(Account::new(AccountId::new("reserve"), None, Direction::Credit, Decimal::MAX))
            .unwrap();
        let ids = SequentialIdGenerator::new("id");
        let before = state.accounts();

        let err = state
            .post(&validated("cash", "reserve", dec!(1)), TransactionHeader::new(Utc::now()), &ids)
            .unwrap_err();

        assert_eq!(err, LedgerError::BalanceOverflow(AccountId::new("reserve")));
        assert_eq!(state.accounts(), before);
        assert!(state.entries().is_empty());
        assert!(state.transactions.is_empty());

        state
            .post(&validated("reserve", "cash", dec!(1)), TransactionHeader::new(Utc::now()), &ids)
            .unwrap();
        assert_eq!(balance(&state, "reserve"), Decimal::MAX - dec!(1));
        assert_eq!(balance(&state, "cash"), dec!(-1));
        assert!(state.drift().unwrap().is_empty());
    }

    #[test]
    fn duplicate_account_is_rejected() {
        let mut state = ledger();
        let err = state
            .insert_account(Account::new(AccountId::new("cash"), None, Direction::Credit, dec!(5)))
            .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateAccount(AccountId::new("cash")));
        assert_eq!(state.account(&AccountId::new("cash")).unwrap().direction, Direction::Debit);
    }

    #[test]
    fn duplicate_transaction_id_is_last_write_wins() {
        let mut state = ledger();
        let ids = SequentialIdGenerator::new("id");
        let header = || TransactionHeader::new(Utc::now()).with_id(TransactionId::new("t1"));

        state.post(&validated("cash", "revenue", dec!(1)), header(), &ids).unwrap();
        let second = state.post(&validated("cash", "revenue", dec!(2)), header(), &ids).unwrap();

        assert_eq!(state.transaction(&TransactionId::new("t1")), Some(&second));
        assert_eq!(state.entries().len(), 4);
        assert_eq!(balance(&state, "cash"), dec!(3));
    }

    #[test]
    fn accounts_are_sorted_by_id() {
        let state = ledger();
        let ids: Vec<_> = state.accounts().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AccountId::new("cash"), AccountId::new("revenue")]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of postings (including failed ones),
        /// replaying the entry log reproduces every cached balance.
        #[test]
        fn replay_reproduces_cached_balances(
            ops in prop::collection::vec((0usize..4, 0usize..4, 1i64..100_000i64), 1..40),
            opening in -1_000i64..1_000i64,
        ) {
            let names = ["cash", "revenue", "expense", "ghost"];
            let mut state = LedgerState::new();
            state.insert_account(Account::new(AccountId::new("cash"), None, Direction::Debit, Decimal::from(opening))).unwrap();
            state.insert_account(Account::new(AccountId::new("revenue"), None, Direction::Credit, Decimal::ZERO)).unwrap();
            state.insert_account(Account::new(AccountId::new("expense"), None, Direction::Debit, Decimal::ZERO)).unwrap();
            let ids = SequentialIdGenerator::new("id");

            for (d, c, amount) in ops {
                let entries = validated(names[d], names[c], Decimal::new(amount, 2));
                let _ = state.post(&entries, TransactionHeader::new(Utc::now()), &ids);
            }

            prop_assert!(state.drift().unwrap().is_empty());

            // Conservation: every transaction moved equal debit and credit.
            for tx in state.transactions.values() {
                let debit: Decimal = tx.entries.iter().filter(|e| e.direction == Direction::Debit).map(|e| e.amount).sum();
                let credit: Decimal = tx.entries.iter().filter(|e| e.direction == Direction::Credit).map(|e| e.amount).sum();
                prop_assert_eq!(debit, credit);
            }
        }
    }
}
