//! Implements a SQLite backed ledger store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, Transaction as SqlTransaction, params};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    models::{LEDGER_ID, LedgerDraft, LedgerReport, LedgerSummary, LedgerTransaction,
        NewTransaction},
    stores::LedgerStore,
};

/// Stores the singleton ledger report in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteLedgerStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl LedgerStore for SQLiteLedgerStore {
    /// Retrieve the current report.
    ///
    /// Returns the zero-valued default when no ledger row has been saved yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn get(&self) -> Result<LedgerReport, Error> {
        let connection = self.connection.lock().unwrap();

        let ledger_row = connection.query_row(
            "SELECT notes, opening_balance FROM ledger WHERE id = ?1",
            [LEDGER_ID],
            |row| {
                let notes_json: String = row.get(0)?;
                let opening_balance: String = row.get(1)?;
                Ok((notes_json, opening_balance))
            },
        );

        let (notes_json, opening_balance) = match ledger_row {
            Ok(columns) => columns,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(LedgerReport::default()),
            Err(error) => return Err(error.into()),
        };

        Ok(LedgerReport {
            opening_balance: parse_stored_decimal(&opening_balance),
            notes: serde_json::from_str(&notes_json).unwrap_or_else(|error| {
                tracing::warn!("could not parse the stored ledger notes: {}", error);
                Vec::new()
            }),
            inbound: select_transactions(&connection, "inbound_transaction")?,
            outbound: select_transactions(&connection, "outbound_transaction")?,
        })
    }

    /// Replace the stored report with `draft` in one SQL transaction.
    ///
    /// The ledger row is upserted under the fixed ID, every existing inbound
    /// and outbound row is deleted, and the submitted rows are inserted with a
    /// single server-assigned timestamp. Any failure rolls the whole
    /// transaction back, so no partial replacement is ever observable.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn replace(&mut self, draft: LedgerDraft) -> Result<LedgerSummary, Error> {
        let notes_json = serde_json::to_string(&draft.notes)
            .map_err(|error| Error::Serialization(error.to_string()))?;

        let connection = self.connection.lock().unwrap();
        let transaction = connection.unchecked_transaction()?;

        transaction.execute(
            "INSERT INTO ledger (id, notes, opening_balance, total_in, total_out, total_balance)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 notes = excluded.notes,
                 opening_balance = excluded.opening_balance,
                 total_in = excluded.total_in,
                 total_out = excluded.total_out,
                 total_balance = excluded.total_balance",
            params![
                LEDGER_ID,
                notes_json,
                draft.opening_balance.to_string(),
                draft.total_in.to_string(),
                draft.total_out.to_string(),
                draft.total_balance.to_string(),
            ],
        )?;

        transaction.execute(
            "DELETE FROM inbound_transaction WHERE ledger_id = ?1",
            [LEDGER_ID],
        )?;
        transaction.execute(
            "DELETE FROM outbound_transaction WHERE ledger_id = ?1",
            [LEDGER_ID],
        )?;

        // One timestamp for the whole batch keeps insertion order the only
        // tie-breaker between rows saved together.
        let occurred_at = OffsetDateTime::now_utc();
        insert_transactions(&transaction, "inbound_transaction", &draft.inbound, occurred_at)?;
        insert_transactions(
            &transaction,
            "outbound_transaction",
            &draft.outbound,
            occurred_at,
        )?;

        transaction.commit()?;

        Ok(LedgerSummary {
            ledger_id: LEDGER_ID,
            opening_balance: draft.opening_balance,
            total_in: draft.total_in,
            total_out: draft.total_out,
            total_balance: draft.total_balance,
        })
    }
}

fn select_transactions(
    connection: &Connection,
    table: &str,
) -> Result<Vec<LedgerTransaction>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT id, description, amount, occurred_at FROM {table}
         WHERE ledger_id = ?1
         ORDER BY id ASC"
    ))?;

    let transactions = statement
        .query_map([LEDGER_ID], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

fn map_transaction_row(row: &Row) -> rusqlite::Result<LedgerTransaction> {
    let amount: String = row.get(2)?;

    Ok(LedgerTransaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: parse_stored_decimal(&amount),
        occurred_at: row.get(3)?,
    })
}

fn insert_transactions(
    transaction: &SqlTransaction,
    table: &str,
    entries: &[NewTransaction],
    occurred_at: OffsetDateTime,
) -> Result<(), Error> {
    let mut statement = transaction.prepare(&format!(
        "INSERT INTO {table} (description, amount, occurred_at, ledger_id)
         VALUES (?1, ?2, ?3, ?4)"
    ))?;

    for entry in entries {
        statement.execute(params![
            entry.description,
            entry.amount.to_string(),
            occurred_at,
            LEDGER_ID
        ])?;
    }

    Ok(())
}

fn parse_stored_decimal(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod sqlite_ledger_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        db::initialize,
        models::{LedgerDraft, LedgerReport, NewTransaction},
        stores::{LedgerStore, SQLiteLedgerStore},
    };

    fn new_store() -> (SQLiteLedgerStore, Arc<Mutex<Connection>>) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (SQLiteLedgerStore::new(connection.clone()), connection)
    }

    fn sample_draft() -> LedgerDraft {
        LedgerDraft::new(
            Decimal::from(100_000),
            vec!["Kas bulan Juni".to_string(), "Saldo dihitung ulang".to_string()],
            vec![
                NewTransaction::new("Budi", Decimal::from(50_000)),
                NewTransaction::new("Sari", Decimal::from(20_000)),
            ],
            vec![NewTransaction::new("Lapangan", Decimal::from(30_000))],
        )
    }

    #[test]
    fn get_returns_default_before_first_save() {
        let (store, _) = new_store();

        let report = store.get().unwrap();

        assert_eq!(report, LedgerReport::default());
        assert_eq!(report.opening_balance, Decimal::ZERO);
    }

    #[test]
    fn replace_then_get_round_trips_lists_and_totals() {
        let (mut store, _) = new_store();
        let draft = sample_draft();

        let summary = store.replace(draft.clone()).unwrap();
        let report = store.get().unwrap();

        assert_eq!(summary.total_in, Decimal::from(70_000));
        assert_eq!(summary.total_out, Decimal::from(30_000));
        assert_eq!(summary.total_balance, Decimal::from(140_000));

        assert_eq!(report.opening_balance, draft.opening_balance);
        assert_eq!(report.notes, draft.notes);
        assert_eq!(report.inbound.len(), draft.inbound.len());
        assert_eq!(report.outbound.len(), draft.outbound.len());

        for (stored, submitted) in report.inbound.iter().zip(&draft.inbound) {
            assert_eq!(stored.description, submitted.description);
            assert_eq!(stored.amount, submitted.amount);
        }
    }

    #[test]
    fn replace_preserves_submission_order() {
        let (mut store, _) = new_store();
        let inbound: Vec<NewTransaction> = (0..10)
            .map(|i| NewTransaction::new(&format!("member {i}"), Decimal::from(i)))
            .collect();

        store
            .replace(LedgerDraft::new(Decimal::ZERO, vec![], inbound, vec![]))
            .unwrap();
        let report = store.get().unwrap();

        let descriptions: Vec<&str> = report
            .inbound
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        let expected: Vec<String> = (0..10).map(|i| format!("member {i}")).collect();
        assert_eq!(descriptions, expected);

        // IDs must be strictly increasing so the order is deterministic even
        // for rows sharing one timestamp.
        for pair in report.inbound.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn replace_is_idempotent() {
        let (mut store, connection) = new_store();
        let draft = sample_draft();

        let first = store.replace(draft.clone()).unwrap();
        let second = store.replace(draft).unwrap();

        assert_eq!(first, second);

        let connection = connection.lock().unwrap();
        let inbound_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM inbound_transaction", (), |row| {
                row.get(0)
            })
            .unwrap();
        let ledger_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM ledger", (), |row| row.get(0))
            .unwrap();

        assert_eq!(inbound_count, 2);
        assert_eq!(ledger_count, 1);
    }

    #[test]
    fn replaced_rows_get_fresh_ids() {
        let (mut store, _) = new_store();
        let draft = sample_draft();

        store.replace(draft.clone()).unwrap();
        let first_ids: Vec<i64> = store.get().unwrap().inbound.iter().map(|t| t.id).collect();

        store.replace(draft).unwrap();
        let second_ids: Vec<i64> = store.get().unwrap().inbound.iter().map(|t| t.id).collect();

        for id in &second_ids {
            assert!(!first_ids.contains(id), "row ID {id} was reused");
        }
    }

    #[test]
    fn zero_and_negative_amounts_are_stored_as_written() {
        let (mut store, _) = new_store();

        store
            .replace(LedgerDraft::new(
                Decimal::ZERO,
                vec![],
                vec![
                    NewTransaction::new("gratis", Decimal::ZERO),
                    NewTransaction::new("koreksi", Decimal::from(-7_500)),
                ],
                vec![],
            ))
            .unwrap();

        let report = store.get().unwrap();
        assert_eq!(report.inbound[0].amount, Decimal::ZERO);
        assert_eq!(report.inbound[1].amount, Decimal::from(-7_500));
    }

    #[test]
    fn corrupt_stored_notes_read_as_empty_without_failing() {
        let (mut store, connection) = new_store();
        store.replace(sample_draft()).unwrap();

        connection
            .lock()
            .unwrap()
            .execute("UPDATE ledger SET notes = 'not json' WHERE id = 1", ())
            .unwrap();

        let report = store.get().unwrap();

        assert_eq!(report.notes, Vec::<String>::new());
        assert_eq!(report.opening_balance, Decimal::from(100_000));
        assert_eq!(report.inbound.len(), 2);
    }

    #[test]
    fn failed_replace_rolls_back_to_previous_state() {
        let (mut store, connection) = new_store();
        let original = sample_draft();
        store.replace(original.clone()).unwrap();
        let before = store.get().unwrap();

        // Make the insert phase fail after the upsert and deletes have run.
        connection
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER simulated_fault BEFORE INSERT ON outbound_transaction
                 BEGIN SELECT RAISE(ABORT, 'simulated storage fault'); END;",
            )
            .unwrap();

        let result = store.replace(LedgerDraft::new(
            Decimal::from(999),
            vec!["should never persist".to_string()],
            vec![NewTransaction::new("baru", Decimal::from(1))],
            vec![NewTransaction::new("keluar", Decimal::from(2))],
        ));
        assert!(matches!(result, Err(Error::SqlError(_))));

        connection
            .lock()
            .unwrap()
            .execute_batch("DROP TRIGGER simulated_fault;")
            .unwrap();

        // The complete old state must still be visible, not a partial mix.
        let after = store.get().unwrap();
        assert_eq!(after.opening_balance, before.opening_balance);
        assert_eq!(after.notes, before.notes);
        assert_eq!(after.inbound, before.inbound);
        assert_eq!(after.outbound, before.outbound);
    }
}
