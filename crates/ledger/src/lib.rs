//! Ledger domain (double-entry, two-leg transactions).
//!
//! Pure domain logic only: no IO, no HTTP, no locking. Concurrency is the
//! store's concern; everything here operates on owned values or `&mut`.

pub mod account;
pub mod applier;
pub mod entry;
pub mod replay;
pub mod state;
pub mod transaction;
pub mod validator;

pub use account::{Account, Direction};
pub use applier::{AccountLookup, Posting, resolve};
pub use entry::{CandidateEntry, Entry, EntryDraft};
pub use replay::{Opening, replay_balances};
pub use state::LedgerState;
pub use transaction::{Transaction, TransactionHeader};
pub use validator::{ValidatedEntries, validate_entries};
