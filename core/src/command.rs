use serde::{Deserialize, Serialize};

use crate::{
    criteria::{RawFilter, RawSort},
    error::LedgerError,
    types::{InsertionResult, NewTransaction, TransactionRecord},
};

/// Requests accepted at the message boundary, one per presentation-layer call.
/// Filters and sorts stay in wire form until the ledger validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum LedgerCommand {
    AddCredit {
        entry: NewTransaction,
    },
    GetCredits {
        #[serde(default)]
        filters: Vec<RawFilter>,
        #[serde(default)]
        sorts:   Vec<RawSort>,
    },
    AddDebit {
        entry: NewTransaction,
    },
    GetDebits {
        #[serde(default)]
        filters: Vec<RawFilter>,
        #[serde(default)]
        sorts:   Vec<RawSort>,
    },
}

impl LedgerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::AddCredit { .. }  => "add_credit",
            LedgerCommand::GetCredits { .. } => "get_credits",
            LedgerCommand::AddDebit { .. }   => "add_debit",
            LedgerCommand::GetDebits { .. }  => "get_debits",
        }
    }
}

/// Successful outcome: `{"id": n}` for inserts, an array of records for queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandReply {
    Inserted(InsertionResult),
    Records(Vec<TransactionRecord>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub code:    String,
    pub message: String,
}

/// Failed outcome: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReply {
    pub error: ErrorBody,
}

impl ErrorReply {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code:    code.to_string(),
                message: message.into(),
            },
        }
    }
}

impl From<&LedgerError> for ErrorReply {
    fn from(err: &LedgerError) -> Self {
        ErrorReply::new(err.code(), err.to_string())
    }
}
