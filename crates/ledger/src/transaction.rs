use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tally_core::{Entity, TransactionId};

use crate::entry::Entry;

/// Caller-controlled attributes of a transaction about to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHeader {
    /// Generated when absent.
    pub id: Option<TransactionId>,
    pub name: Option<String>,
    pub posted_at: DateTime<Utc>,
}

impl TransactionHeader {
    pub fn new(posted_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: None,
            posted_at,
        }
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A balanced pair of entries, immutable once posted.
///
/// Entries appear in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub entries: Vec<Entry>,
    pub posted_at: DateTime<Utc>,
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
