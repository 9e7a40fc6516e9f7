//! Transaction application, split into two phases.
//!
//! - **resolve** (pure): bind every validated draft to an existing account,
//!   compute its signed delta and materialise the entry. Produces a
//!   [`Posting`] or fails on the first unknown account or on a balance that
//!   would leave the `Decimal` range.
//! - **commit** (`LedgerState::commit`): apply a resolved posting. Commit
//!   cannot fail, so a posting is either applied entirely or not at all.
//!
//! [`LedgerState::post`](crate::state::LedgerState::post) runs both phases
//! back to back against the same state.

use rust_decimal::Decimal;

use tally_core::{AccountId, EntryId, IdGenerator, LedgerError, LedgerResult, TransactionId};

use crate::account::Account;
use crate::entry::Entry;
use crate::transaction::{Transaction, TransactionHeader};
use crate::validator::ValidatedEntries;

/// Read-only account resolution used during the resolve phase.
pub trait AccountLookup {
    fn lookup(&self, id: &AccountId) -> Option<&Account>;
}

/// A fully resolved transaction, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    transaction: Transaction,
    /// Signed balance change per entry, parallel to `transaction.entries`.
    deltas: Vec<(AccountId, Decimal)>,
}

impl Posting {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn deltas(&self) -> &[(AccountId, Decimal)] {
        &self.deltas
    }

    pub(crate) fn into_parts(self) -> (Transaction, Vec<(AccountId, Decimal)>) {
        (self.transaction, self.deltas)
    }
}

/// Resolve validated entries against `accounts`.
///
/// Entries are processed in submission order; the first entry whose account
/// is unknown aborts with [`LedgerError::AccountNotFound`]. Each delta is
/// added to the account's projected balance in the same order commit will
/// apply it, and an overflow aborts with [`LedgerError::BalanceOverflow`].
/// Nothing is mutated here, so an abort leaves every balance as it was.
pub fn resolve<L>(
    entries: &ValidatedEntries,
    header: TransactionHeader,
    accounts: &L,
    ids: &dyn IdGenerator,
) -> LedgerResult<Posting>
where
    L: AccountLookup + ?Sized,
{
    let transaction_id = header
        .id
        .unwrap_or_else(|| TransactionId::generate(ids));

    let mut materialised = Vec::with_capacity(entries.drafts().len());
    let mut deltas = Vec::with_capacity(entries.drafts().len());
    // Both legs may name the same account, so balances are projected per id.
    let mut projected: Vec<(AccountId, Decimal)> = Vec::with_capacity(entries.drafts().len());

    for draft in entries.drafts() {
        let account = accounts
            .lookup(&draft.account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(draft.account_id.clone()))?;

        let delta = draft.direction.delta_for(account.direction, draft.amount);
        project(&mut projected, account, delta)?;
        deltas.push((account.id.clone(), delta));

        materialised.push(Entry {
            id: EntryId::generate(ids),
            transaction_id: transaction_id.clone(),
            account_id: draft.account_id.clone(),
            direction: draft.direction,
            amount: draft.amount,
        });
    }

    Ok(Posting {
        transaction: Transaction {
            id: transaction_id,
            name: header.name,
            entries: materialised,
            posted_at: header.posted_at,
        },
        deltas,
    })
}

fn project(projected: &mut Vec<(AccountId, Decimal)>, account: &Account, delta: Decimal) -> LedgerResult<()> {
    let slot = match projected.iter().position(|(id, _)| *id == account.id) {
        Some(i) => &mut projected[i].1,
        None => {
            let last = projected.len();
            projected.push((account.id.clone(), account.balance));
            &mut projected[last].1
        }
    };
    *slot = slot
        .checked_add(delta)
        .ok_or_else(|| LedgerError::BalanceOverflow(account.id.clone()))?;
    Ok(())
}
