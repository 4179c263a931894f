//! Glome ledger core: credit/debit records in SQLite, queried through
//! user-selected filter and sort criteria.

pub mod command;
pub mod config;
pub mod criteria;
pub mod error;
pub mod ledger;
pub mod store;
pub mod types;

pub use command::{CommandReply, ErrorReply, LedgerCommand};
pub use config::LedgerConfig;
pub use criteria::{Filter, FilterValue, Operator, Orientation, Property, Sort};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use store::LedgerStore;
pub use types::{InsertionResult, NewTransaction, RecordKind, TransactionRecord};
