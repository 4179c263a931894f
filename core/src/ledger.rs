//! The ledger boundary: the four operations the presentation layer calls.
//!
//! RULE: one `Ledger` per process, built by the composition root and passed
//! to whoever needs it. There is no global database handle.
//! Every failure is logged here and returned unchanged; nothing is swallowed.

use std::sync::Mutex;

use serde::Serialize;

use crate::{
    command::{CommandReply, LedgerCommand},
    config::LedgerConfig,
    criteria::{self, Filter, RawFilter, RawSort, Sort},
    error::{LedgerError, LedgerResult},
    store::LedgerStore,
    types::{InsertionResult, NewTransaction, RecordKind, TransactionRecord},
};

pub struct Ledger {
    store: Mutex<LedgerStore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub count: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub credits: CollectionSummary,
    pub debits:  CollectionSummary,
    /// Credit total minus debit total.
    pub balance: f64,
}

impl Ledger {
    pub fn new(store: LedgerStore) -> Self {
        Self { store: Mutex::new(store) }
    }

    /// Open the configured database and make sure both tables exist.
    pub fn open(config: &LedgerConfig) -> LedgerResult<Self> {
        let store = LedgerStore::open(&config.db_path, config.busy_timeout())?;
        store.migrate()?;
        Ok(Self::new(store))
    }

    /// Run `f` with exclusive access to the store.
    pub fn with_store<T>(&self, f: impl FnOnce(&LedgerStore) -> LedgerResult<T>) -> LedgerResult<T> {
        let guard = self.store.lock()?;
        f(&guard)
    }

    // ── Boundary operations ───────────────────────────────────────

    pub fn add_credit(&self, entry: &NewTransaction) -> LedgerResult<InsertionResult> {
        self.add(RecordKind::Credit, entry)
    }

    pub fn get_credits(&self, filters: &[Filter], sorts: &[Sort]) -> LedgerResult<Vec<TransactionRecord>> {
        self.fetch(RecordKind::Credit, filters, sorts)
    }

    pub fn add_debit(&self, entry: &NewTransaction) -> LedgerResult<InsertionResult> {
        self.add(RecordKind::Debit, entry)
    }

    pub fn get_debits(&self, filters: &[Filter], sorts: &[Sort]) -> LedgerResult<Vec<TransactionRecord>> {
        self.fetch(RecordKind::Debit, filters, sorts)
    }

    /// Execute a boundary command. Wire criteria are validated before the
    /// store is touched.
    pub fn dispatch(&self, command: LedgerCommand) -> LedgerResult<CommandReply> {
        match command {
            LedgerCommand::AddCredit { entry } => self.add_credit(&entry).map(CommandReply::Inserted),
            LedgerCommand::AddDebit { entry }  => self.add_debit(&entry).map(CommandReply::Inserted),
            LedgerCommand::GetCredits { filters, sorts } => self
                .fetch_raw(RecordKind::Credit, filters, sorts)
                .map(CommandReply::Records),
            LedgerCommand::GetDebits { filters, sorts } => self
                .fetch_raw(RecordKind::Debit, filters, sorts)
                .map(CommandReply::Records),
        }
    }

    pub fn summary(&self) -> LedgerResult<LedgerSummary> {
        self.with_store(|store| {
            let collection = |kind: RecordKind| -> LedgerResult<CollectionSummary> {
                Ok(CollectionSummary {
                    count: store.count(kind)?,
                    total: store.total_amount(kind)?,
                })
            };
            let credits = collection(RecordKind::Credit)?;
            let debits = collection(RecordKind::Debit)?;
            let balance = credits.total - debits.total;
            Ok(LedgerSummary { credits, debits, balance })
        })
    }

    pub fn close(self) -> LedgerResult<()> {
        self.store.into_inner()?.close()
    }

    // ── Internals ─────────────────────────────────────────────────

    fn add(&self, kind: RecordKind, entry: &NewTransaction) -> LedgerResult<InsertionResult> {
        self.with_store(|store| store.insert(kind, entry))
            .map(|id| {
                log::debug!("added {} {id}", kind.noun());
                InsertionResult { id }
            })
            .map_err(|e| report(&format!("adding {}", kind.noun()), e))
    }

    fn fetch(
        &self,
        kind: RecordKind,
        filters: &[Filter],
        sorts: &[Sort],
    ) -> LedgerResult<Vec<TransactionRecord>> {
        self.with_store(|store| store.query(kind, filters, sorts))
            .map_err(|e| report(&format!("fetching {}", kind.table()), e))
    }

    fn fetch_raw(
        &self,
        kind: RecordKind,
        filters: Vec<RawFilter>,
        sorts: Vec<RawSort>,
    ) -> LedgerResult<Vec<TransactionRecord>> {
        let (filters, sorts) = criteria::parse_criteria(filters, sorts)
            .map_err(|e| report(&format!("fetching {}", kind.table()), e))?;
        self.fetch(kind, &filters, &sorts)
    }
}

fn report(action: &str, err: LedgerError) -> LedgerError {
    log::error!("Error when {action}: {err}");
    err
}
