//! This file defines the routes for reading the club's ledger report and for
//! the admin-only atomic replace.

use std::str::FromStr;

use axum::{Json, extract::State};
use rust_decimal::Decimal;

use crate::{
    Error,
    auth::Claims,
    models::{LedgerDraft, LedgerReport, LedgerSummary, NewTransaction},
    state::AppState,
    stores::{AccountStore, LedgerStore},
};

/// The report submitted by the admin form.
///
/// Every field is optional on the wire: absent fields fall back to their
/// zero values instead of failing the request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveLedgerPayload {
    /// The opening balance as a decimal string. Non-numeric input parses
    /// to zero.
    pub opening_balance: String,
    /// Free-form remarks, kept in submission order.
    pub notes: Vec<String>,
    /// The complete set of incoming transactions.
    pub inbound: Vec<NewTransaction>,
    /// The complete set of outgoing transactions.
    pub outbound: Vec<NewTransaction>,
}

/// Handler for reading the current ledger report.
///
/// Always succeeds with a 200 while the store is reachable; before the first
/// save the zero-valued default report is returned so a fresh deployment can
/// render an empty page.
pub async fn get_ledger<L, A>(
    State(state): State<AppState<L, A>>,
) -> Result<Json<LedgerReport>, Error>
where
    L: LedgerStore + Clone + Send + Sync,
    A: AccountStore + Clone + Send + Sync,
{
    state.ledger_store.get().map(Json)
}

/// Handler for the admin-only atomic replace of the ledger report.
///
/// The admin check runs before any store access. The payload is then
/// normalized (lenient opening-balance parse, zero-defaulted amounts — zero
/// and negative amounts are accepted as written), the aggregate totals are
/// computed, and the store swaps the whole report in one transaction. A
/// failure leaves the previous report fully intact.
///
/// # Errors
///
/// - [Error::Unauthenticated] / [Error::InvalidToken] without a valid cookie.
/// - [Error::Forbidden] for authenticated non-admins.
/// - [Error::SqlError] when the store fails; the transaction is rolled back.
pub async fn save_ledger<L, A>(
    State(mut state): State<AppState<L, A>>,
    claims: Claims,
    Json(payload): Json<SaveLedgerPayload>,
) -> Result<Json<LedgerSummary>, Error>
where
    L: LedgerStore + Clone + Send + Sync,
    A: AccountStore + Clone + Send + Sync,
{
    claims.require_admin()?;

    let draft = LedgerDraft::new(
        parse_opening_balance(&payload.opening_balance),
        payload.notes,
        payload.inbound,
        payload.outbound,
    );

    state.ledger_store.replace(draft).map(Json)
}

/// Parse the submitted opening balance, falling back to zero on any input
/// that is not a decimal number.
fn parse_opening_balance(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}
