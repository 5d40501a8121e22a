use mongodb::error::Error as DbError;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by a store backing.
///
/// "No matching row" on a read is not an error: reads return `Option` or an
/// empty collection. `NotFound` is reserved for writes that target a record
/// that does not exist.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    /// A uniqueness constraint of the backing rejected the write.
    #[error("Duplicate: {0}")]
    Duplicate(String),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("Store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
