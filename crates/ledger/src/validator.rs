//! Entry validation: structural and arithmetic checks on proposed entries.
//!
//! Validation is a pure function of its input. It never looks at accounts;
//! whether the referenced accounts exist is decided later, by the applier.

use rust_decimal::Decimal;

use tally_core::{AccountId, LedgerError, LedgerResult};

use crate::account::Direction;
use crate::entry::{CandidateEntry, EntryDraft};

/// Entries that form a structurally valid two-leg transaction.
///
/// Only [`validate_entries`] constructs this, so holding one proves the
/// entries are one debit and one credit of equal, positive amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntries {
    drafts: Vec<EntryDraft>,
}

impl ValidatedEntries {
    /// Drafts in submission order.
    pub fn drafts(&self) -> &[EntryDraft] {
        &self.drafts
    }

    /// The amount moved by the transaction (equal on both sides).
    pub fn amount(&self) -> Decimal {
        self.drafts
            .iter()
            .filter(|d| d.direction == Direction::Debit)
            .map(|d| d.amount)
            .sum()
    }
}

/// Validate a proposed entry list.
///
/// Checks run in a fixed order and the first failure wins:
///
/// 1. [`LedgerError::InvalidEntries`]: list absent, fewer than two entries,
///    an entry missing `accountId`, `direction` or `amount`, or a
///    non-positive amount.
/// 2. [`LedgerError::UnbalancedDirectionCount`]: anything other than exactly
///    one debit and one credit (unknown direction strings count as neither).
/// 3. [`LedgerError::AmountMismatch`]: debit total differs from credit total.
pub fn validate_entries(entries: Option<&[CandidateEntry]>) -> LedgerResult<ValidatedEntries> {
    let entries = match entries {
        Some(e) if e.len() >= 2 => e,
        _ => return Err(LedgerError::InvalidEntries),
    };

    let mut shaped = Vec::with_capacity(entries.len());
    for entry in entries {
        let (Some(account_id), Some(direction), Some(amount)) =
            (&entry.account_id, &entry.direction, entry.amount)
        else {
            return Err(LedgerError::InvalidEntries);
        };
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidEntries);
        }
        shaped.push((account_id, direction.parse::<Direction>().ok(), amount));
    }

    let debit_count = shaped
        .iter()
        .filter(|(_, d, _)| *d == Some(Direction::Debit))
        .count();
    let credit_count = shaped
        .iter()
        .filter(|(_, d, _)| *d == Some(Direction::Credit))
        .count();

    if debit_count != 1 || credit_count != 1 || shaped.len() != 2 {
        return Err(LedgerError::UnbalancedDirectionCount);
    }

    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;
    let mut drafts = Vec::with_capacity(shaped.len());

    for (account_id, direction, amount) in shaped {
        // Step 2 guarantees every direction is known.
        let Some(direction) = direction else {
            return Err(LedgerError::UnbalancedDirectionCount);
        };
        match direction {
            Direction::Debit => debit_total += amount,
            Direction::Credit => credit_total += amount,
        }
        drafts.push(EntryDraft {
            account_id: AccountId::new(account_id.as_str()),
            direction,
            amount,
        });
    }

    if debit_total != credit_total {
        return Err(LedgerError::AmountMismatch);
    }

    Ok(ValidatedEntries { drafts })
}
