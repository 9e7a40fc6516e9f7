use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use tally_infra::{NewAccount, NewTransaction};
use tally_ledger::CandidateEntry;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Kept loose so that a non-string direction is reported as an invalid
    /// direction rather than a malformed body.
    #[serde(default)]
    pub direction: Option<JsonValue>,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<CandidateEntry>>,
}

// -------------------------
// Mapping onto service inputs
// -------------------------

impl From<CreateAccountRequest> for NewAccount {
    fn from(req: CreateAccountRequest) -> Self {
        NewAccount {
            id: req.id,
            name: req.name,
            direction: match req.direction {
                Some(JsonValue::String(s)) => Some(s),
                _ => None,
            },
            balance: req.balance,
        }
    }
}

impl From<CreateTransactionRequest> for NewTransaction {
    fn from(req: CreateTransactionRequest) -> Self {
        NewTransaction {
            id: req.id,
            name: req.name,
            entries: req.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_string_direction_maps_to_none() {
        let req: CreateAccountRequest = serde_json::from_str(r#"{"direction": 7}"#).unwrap();
        let account: NewAccount = req.into();
        assert_eq!(account.direction, None);
    }

    #[test]
    fn account_request_fields_are_optional() {
        let req: CreateAccountRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(NewAccount::from(req), NewAccount::default());
    }

    #[test]
    fn transaction_request_reads_camel_case_entries() {
        let req: CreateTransactionRequest = serde_json::from_str(
            r#"{"id":"t1","entries":[{"accountId":"a","direction":"debit","amount":5}]}"#,
        )
        .unwrap();
        let tx: NewTransaction = req.into();
        assert_eq!(tx.id.as_deref(), Some("t1"));
        let entries = tx.entries.unwrap();
        assert_eq!(entries[0].account_id.as_deref(), Some("a"));
        assert_eq!(entries[0].amount, Some(Decimal::from(5)));
    }
}
