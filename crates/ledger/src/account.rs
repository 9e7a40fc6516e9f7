use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{AccountId, Entity, LedgerError};

/// Polarity of an account or entry.
///
/// An account's direction is its normal balance side: entries on that side
/// increase the balance, entries on the opposite side decrease it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }

    /// Signed effect of an entry moving `amount` in `self` on an account
    /// whose normal side is `account`.
    pub fn delta_for(self, account: Direction, amount: Decimal) -> Decimal {
        if self == account { amount } else { -amount }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LedgerError;

    /// Exact, case-sensitive match on `"debit"` / `"credit"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debit" => Ok(Direction::Debit),
            "credit" => Ok(Direction::Credit),
            _ => Err(LedgerError::InvalidDirection),
        }
    }
}

/// A named account with a fixed direction and a running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub direction: Direction,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, name: Option<String>, direction: Direction, balance: Decimal) -> Self {
        Self {
            id,
            name,
            direction,
            balance,
        }
    }

    /// Add a signed delta to the balance.
    ///
    /// Callers apply only deltas that `applier::resolve` has range-checked
    /// against this balance; an unchecked delta saturates instead of panicking.
    pub(crate) fn apply_delta(&mut self, delta: Decimal) {
        self.balance = self.balance.saturating_add(delta);
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
