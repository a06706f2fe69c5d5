//! Defines the ledger store trait.

use crate::{
    Error,
    models::{LedgerDraft, LedgerReport, LedgerSummary},
};

/// Handles reading and atomically replacing the club's single ledger report.
pub trait LedgerStore {
    /// Retrieve the current report with both transaction lists ordered by
    /// ascending insertion ID.
    ///
    /// Returns the zero-valued [LedgerReport::default] when nothing has been
    /// saved yet, so first-time deployments can render an empty report.
    fn get(&self) -> Result<LedgerReport, Error>;

    /// Replace the whole report in one atomic unit.
    ///
    /// Implementers must guarantee that either every part of `draft` is
    /// persisted (ledger row upserted, old transaction rows deleted, new rows
    /// inserted with server-assigned timestamps) or none of it is. A failed
    /// call leaves the store exactly as it was.
    fn replace(&mut self, draft: LedgerDraft) -> Result<LedgerSummary, Error>;
}
