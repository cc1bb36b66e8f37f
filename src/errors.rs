use thiserror::Error;
use uuid::Uuid;

/// Unified error type for record, budget, and storage layers.
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("No active user session")]
    MissingScope,
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Budget entry not found: {0}")]
    BudgetNotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}
