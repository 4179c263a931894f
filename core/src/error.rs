use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unsupported operator type: {value}")]
    UnsupportedOperator { value: String },

    #[error("Unsupported property: {value}")]
    UnsupportedProperty { value: String },

    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable code reported across the message boundary.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            LedgerError::UnsupportedProperty { .. } => "UNSUPPORTED_PROPERTY",
            LedgerError::Storage(_)                 => "STORAGE_FAILURE",
            LedgerError::Io(_)                      => "IO_ERROR",
            LedgerError::LockPoisoned               => "LOCK_ERROR",
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for LedgerError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        LedgerError::LockPoisoned
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
