//! Ledger error model.

use thiserror::Error;

use crate::id::{AccountId, TransactionId};

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Coarse classification of a [`LedgerError`].
///
/// Transports map on this rather than on individual variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or unbalanced request; the caller must fix it.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// The record already exists.
    Conflict,
    /// Invalid account setup (e.g. unknown direction).
    Configuration,
    /// The store itself failed.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Ledger-level error.
///
/// Every variant is terminal for the request that produced it. None of them
/// are transient, so nothing retries on them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Entries are absent, too few, or missing a required field.
    #[error("Invalid Entries")]
    InvalidEntries,

    /// Entries are not exactly one debit and one credit.
    #[error("Transaction must contain exactly one debit and one credit")]
    UnbalancedDirectionCount,

    /// Total debits differ from total credits.
    #[error("Entries do not balance")]
    AmountMismatch,

    /// An entry references an account that does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account lookup by id failed.
    #[error("Account not found")]
    NotFound,

    /// Transaction lookup by id failed.
    #[error("Transaction not found")]
    TransactionNotFound(TransactionId),

    /// An account with this id was already created.
    #[error("Account already exists: {0}")]
    DuplicateAccount(AccountId),

    /// Posting would push an account balance outside the representable range.
    #[error("Balance out of range: {0}")]
    BalanceOverflow(AccountId),

    /// Account direction is not "debit" or "credit".
    #[error("direction must be 'debit' or 'credit'")]
    InvalidDirection,

    /// The backing store could not be accessed (e.g. poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidEntries
            | LedgerError::UnbalancedDirectionCount
            | LedgerError::AmountMismatch
            | LedgerError::BalanceOverflow(_) => ErrorKind::Validation,
            LedgerError::AccountNotFound(_)
            | LedgerError::NotFound
            | LedgerError::TransactionNotFound(_) => ErrorKind::NotFound,
            LedgerError::DuplicateAccount(_) => ErrorKind::Conflict,
            LedgerError::InvalidDirection => ErrorKind::Configuration,
            LedgerError::Storage(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(LedgerError::InvalidEntries.to_string(), "Invalid Entries");
        assert_eq!(
            LedgerError::UnbalancedDirectionCount.to_string(),
            "Transaction must contain exactly one debit and one credit"
        );
        assert_eq!(LedgerError::AmountMismatch.to_string(), "Entries do not balance");
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::new("ghost")).to_string(),
            "Account not found: ghost"
        );
        assert_eq!(LedgerError::NotFound.to_string(), "Account not found");
        assert_eq!(
            LedgerError::BalanceOverflow(AccountId::new("revenue")).to_string(),
            "Balance out of range: revenue"
        );
        assert_eq!(
            LedgerError::InvalidDirection.to_string(),
            "direction must be 'debit' or 'credit'"
        );
    }

    #[test]
    fn kinds_group_variants() {
        assert_eq!(LedgerError::AmountMismatch.kind(), ErrorKind::Validation);
        assert_eq!(
            LedgerError::AccountNotFound(AccountId::new("x")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(LedgerError::InvalidDirection.kind(), ErrorKind::Configuration);
        assert_eq!(
            LedgerError::BalanceOverflow(AccountId::new("x")).kind(),
            ErrorKind::Validation
        );
        assert_eq!(LedgerError::storage("poisoned").kind(), ErrorKind::Internal);
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
    }
}
