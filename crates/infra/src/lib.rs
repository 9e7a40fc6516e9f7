//! Infrastructure layer: ledger storage and the application service.

pub mod service;
pub mod store;

pub use service::{LedgerService, NewAccount, NewTransaction};
pub use store::{InMemoryLedgerStore, LedgerStore};
