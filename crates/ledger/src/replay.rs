//! Balance replay from the entry log.
//!
//! Entries are the source of truth; stored balances are a cache. Replaying
//! the log over the opening balances must reproduce the cache exactly.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use tally_core::{AccountId, LedgerError, LedgerResult};

use crate::account::Direction;
use crate::entry::Entry;

/// An account as it stood when it was created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Opening {
    pub direction: Direction,
    pub balance: Decimal,
}

/// Recompute every balance from `openings` plus the signed deltas of `entries`.
///
/// Fails with [`LedgerError::AccountNotFound`] if an entry references an
/// account without an opening, and with [`LedgerError::BalanceOverflow`] if a
/// running balance leaves the `Decimal` range.
pub fn replay_balances(
    openings: &HashMap<AccountId, Opening>,
    entries: &[Entry],
) -> LedgerResult<BTreeMap<AccountId, Decimal>> {
    let mut balances: BTreeMap<AccountId, Decimal> = openings
        .iter()
        .map(|(id, o)| (id.clone(), o.balance))
        .collect();

    for entry in entries {
        let opening = openings
            .get(&entry.account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(entry.account_id.clone()))?;
        let delta = entry.direction.delta_for(opening.direction, entry.amount);
        let balance = balances.entry(entry.account_id.clone()).or_insert(opening.balance);
        *balance = balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::BalanceOverflow(entry.account_id.clone()))?;
    }

    Ok(balances)
}
