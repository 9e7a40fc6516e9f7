//! Strongly-typed identifiers and id generation.

use core::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an account (caller-supplied or generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

/// Identifier of a transaction (caller-supplied or generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

/// Identifier of an entry (always generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Draw a fresh identifier from `ids`.
            pub fn generate(ids: &dyn IdGenerator) -> Self {
                Self(ids.next_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_newtype!(AccountId);
impl_string_newtype!(TransactionId);
impl_string_newtype!(EntryId);

/// Source of collision-resistant identifiers.
///
/// Injected wherever ids are minted so tests can substitute a deterministic
/// sequence.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production generator: UUIDv7 (time-ordered).
#[derive(Debug, Default, Copy, Clone)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic generator yielding `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
