//! This file defines the singleton ledger report and the types used to read
//! and replace it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, LedgerTransaction, NewTransaction};

/// The fixed row ID of the one ledger record in the system.
pub const LEDGER_ID: DatabaseID = 1;

/// The club's financial report as seen by readers.
///
/// Before the first save there is no ledger row; readers get the zero-valued
/// default from [Default] instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    /// The balance carried over from before the report's first transaction.
    /// Serialized as a decimal string.
    pub opening_balance: Decimal,
    /// Free-form remarks attached to the report, in the order they were saved.
    pub notes: Vec<String>,
    /// Incoming transactions ordered by ascending insertion ID.
    pub inbound: Vec<LedgerTransaction>,
    /// Outgoing transactions ordered by ascending insertion ID.
    pub outbound: Vec<LedgerTransaction>,
}

/// A validated, normalized report ready to replace the stored one.
///
/// The aggregate totals are computed once at construction so that the stored
/// columns can never go stale relative to the transaction lists.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerDraft {
    /// The normalized opening balance.
    pub opening_balance: Decimal,
    /// Free-form remarks, persisted as one JSON-encoded text column.
    pub notes: Vec<String>,
    /// The sum of the inbound amounts.
    pub total_in: Decimal,
    /// The sum of the outbound amounts.
    pub total_out: Decimal,
    /// `opening_balance + total_in - total_out`.
    pub total_balance: Decimal,
    /// Incoming transactions to insert, in submission order.
    pub inbound: Vec<NewTransaction>,
    /// Outgoing transactions to insert, in submission order.
    pub outbound: Vec<NewTransaction>,
}

impl LedgerDraft {
    /// Build a draft from normalized inputs, computing the aggregate totals.
    pub fn new(
        opening_balance: Decimal,
        notes: Vec<String>,
        inbound: Vec<NewTransaction>,
        outbound: Vec<NewTransaction>,
    ) -> Self {
        let total_in: Decimal = inbound.iter().map(|transaction| transaction.amount).sum();
        let total_out: Decimal = outbound.iter().map(|transaction| transaction.amount).sum();

        Self {
            opening_balance,
            total_in,
            total_out,
            total_balance: opening_balance + total_in - total_out,
            notes,
            inbound,
            outbound,
        }
    }
}

/// The aggregates reported back to the client after a successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// The ID of the ledger row that was written, always [LEDGER_ID].
    pub ledger_id: DatabaseID,
    /// The normalized opening balance, serialized as a decimal string.
    pub opening_balance: Decimal,
    /// The sum of the inbound amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_in: Decimal,
    /// The sum of the outbound amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_out: Decimal,
    /// `opening_balance + total_in - total_out`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
}
