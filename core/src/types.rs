//! Record shapes shared by the store, the boundary and the runner.

use serde::{Deserialize, Serialize};

/// Row id assigned by SQLite on insert.
pub type RecordId = i64;

/// Which of the two collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Credit,
    Debit,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Credit, RecordKind::Debit];

    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Credit => "credits",
            RecordKind::Debit  => "debits",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            RecordKind::Credit => "credit",
            RecordKind::Debit  => "debit",
        }
    }
}

/// A persisted credit or debit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id:       RecordId,
    pub date:     String,
    pub title:    String,
    pub amount:   f64,
    pub category: String,
}

/// Insert payload. `date` is an ISO-8601 date string and is stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date:     String,
    pub title:    String,
    pub amount:   f64,
    pub category: String,
}

impl NewTransaction {
    pub fn new(date: &str, title: &str, amount: f64, category: &str) -> Self {
        Self {
            date:     date.to_string(),
            title:    title.to_string(),
            amount,
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionResult {
    pub id: RecordId,
}
