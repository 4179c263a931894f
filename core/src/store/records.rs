//! Store methods for the credit and debit collections.

use rusqlite::{params, params_from_iter, Row};

use super::LedgerStore;
use crate::{
    criteria::{self, Filter, Sort},
    error::LedgerResult,
    types::{NewTransaction, RecordId, RecordKind, TransactionRecord},
};

impl LedgerStore {
    // ── Records ───────────────────────────────────────────────────

    pub fn insert(&self, kind: RecordKind, entry: &NewTransaction) -> LedgerResult<RecordId> {
        let sql = format!(
            "INSERT INTO {} (date, title, amount, category) VALUES (?1, ?2, ?3, ?4)",
            kind.table()
        );
        self.conn.execute(
            &sql,
            params![entry.date, entry.title, entry.amount, entry.category],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Records of `kind` matching every filter, ordered by `sorts`.
    /// No sorts means rowid (insertion) order.
    pub fn query(
        &self,
        kind: RecordKind,
        filters: &[Filter],
        sorts: &[Sort],
    ) -> LedgerResult<Vec<TransactionRecord>> {
        let statement = criteria::select_statement(kind, filters, sorts);
        log::debug!(
            "{}: {} [{} params]",
            kind.table(),
            statement.clause,
            statement.params.len()
        );
        let mut stmt = self.conn.prepare(&statement.clause)?;
        let rows = stmt.query_map(params_from_iter(statement.params.iter()), map_record)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Summary helpers ───────────────────────────────────────────

    pub fn count(&self, kind: RecordKind) -> LedgerResult<i64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn total_amount(&self, kind: RecordKind) -> LedgerResult<f64> {
        let total: f64 = self.conn.query_row(
            &format!("SELECT COALESCE(SUM(amount), 0.0) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<TransactionRecord> {
    Ok(TransactionRecord {
        id:       row.get(0)?,
        date:     row.get(1)?,
        title:    row.get(2)?,
        amount:   row.get(3)?,
        category: row.get(4)?,
    })
}
