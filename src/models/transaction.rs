//! This file defines a single cash movement belonging to the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::DatabaseID;

/// One dated cash movement (inbound or outbound) owned by the ledger.
///
/// Rows are deleted and recreated wholesale on every save, so IDs identify a
/// row only within the lifetime of one saved report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    /// The system-assigned row ID.
    pub id: DatabaseID,
    /// A free-form label, e.g. the member or expense the cash relates to.
    pub description: String,
    /// The amount of cash moved. Zero and negative amounts are stored as
    /// submitted.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// When the row was inserted, assigned by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

/// A submitted transaction that has not been persisted yet.
///
/// Client-supplied IDs and timestamps are never read; the store assigns fresh
/// ones on insertion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// A free-form label for the cash movement.
    #[serde(default)]
    pub description: String,
    /// The amount of cash moved, defaulting to zero when absent.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl NewTransaction {
    /// A convenience constructor, mostly useful in tests.
    pub fn new(description: &str, amount: Decimal) -> Self {
        Self {
            description: description.to_string(),
            amount,
        }
    }
}

#[cfg(test)]
mod new_transaction_tests {
    use rust_decimal::Decimal;

    use crate::models::NewTransaction;

    #[test]
    fn missing_amount_defaults_to_zero() {
        let transaction: NewTransaction =
            serde_json::from_str(r#"{"description": "Budi"}"#).unwrap();

        assert_eq!(transaction.amount, Decimal::ZERO);
        assert_eq!(transaction.description, "Budi");
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let transaction: NewTransaction = serde_json::from_str(r#"{"amount": 50000}"#).unwrap();

        assert_eq!(transaction.amount, Decimal::from(50000));
        assert_eq!(transaction.description, "");
    }

    #[test]
    fn negative_amount_is_preserved() {
        let transaction: NewTransaction =
            serde_json::from_str(r#"{"description": "koreksi", "amount": -2500}"#).unwrap();

        assert_eq!(transaction.amount, Decimal::from(-2500));
    }
}
