//! `tally-core` — foundation types shared by every ledger crate.
//!
//! This crate contains **pure** primitives (no infrastructure concerns):
//! identifiers, id generation, and the ledger error taxonomy.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use id::{AccountId, EntryId, IdGenerator, SequentialIdGenerator, TransactionId, UuidV7Generator};
