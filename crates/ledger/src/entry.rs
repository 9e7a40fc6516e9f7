use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{AccountId, Entity, EntryId, TransactionId};

use crate::account::Direction;

/// A proposed entry exactly as the caller sent it.
///
/// Every field is optional so that shape errors surface as a ledger
/// validation failure rather than a decoding failure. `direction` stays a raw
/// string: an unknown value is a counting failure, not a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEntry {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl CandidateEntry {
    pub fn new(account_id: impl Into<String>, direction: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: Some(account_id.into()),
            direction: Some(direction.into()),
            amount: Some(amount),
        }
    }
}

/// A typed entry that has passed validation but is not yet bound to a
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub account_id: AccountId,
    pub direction: Direction,
    /// Positive amount.
    pub amount: Decimal,
}

/// A committed movement of value against one account (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub transaction_id: TransactionId,
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: Decimal,
}

impl Entity for Entry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
