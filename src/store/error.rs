//! Store error types

use thiserror::Error;

/// Errors surfaced by the ledger store.
///
/// `NotFound` is kept distinct so the HTTP layer can map it to 404. Errors
/// raised inside a transaction are wrapped in `Transaction`; if the rollback
/// after such a failure also fails, both causes are preserved in
/// `TransactionRollback` - neither is ever dropped.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// Uniqueness conflict raised by a store that checks duplicates itself
    /// (the in-memory double). The SQL store reports the same condition as a
    /// `Database` error carrying a Postgres constraint-violation code; both
    /// answer true from [`StoreError::is_constraint_violation`].
    #[error("record already exists")]
    AlreadyExists,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("transaction error: {cause}")]
    Transaction {
        #[source]
        cause: Box<StoreError>,
    },

    #[error("transaction error: {cause}, rollback error: {rollback}")]
    TransactionRollback {
        cause: Box<StoreError>,
        #[source]
        rollback: sqlx::Error,
    },
}

impl StoreError {
    /// True if this error, or the transaction failure it wraps, is a
    /// missing-row error.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::NotFound => true,
            StoreError::Transaction { cause } => cause.is_not_found(),
            StoreError::TransactionRollback { cause, .. } => cause.is_not_found(),
            StoreError::AlreadyExists | StoreError::Database(_) => false,
        }
    }

    /// True for unique / foreign key violations, which the HTTP layer maps
    /// to 403 the way the original service did.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StoreError::AlreadyExists => true,
            StoreError::Database(sqlx::Error::Database(db)) => {
                // Postgres: 23503 = foreign_key_violation, 23505 = unique_violation
                matches!(db.code().as_deref(), Some("23503") | Some("23505"))
            }
            StoreError::Transaction { cause } => cause.is_constraint_violation(),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transaction_error_message_keeps_cause() {
        let err = StoreError::Transaction {
            cause: Box::new(StoreError::NotFound),
        };
        assert_eq!(err.to_string(), "transaction error: record not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_rollback_failure_reports_both_causes() {
        let err = StoreError::TransactionRollback {
            cause: Box::new(StoreError::NotFound),
            rollback: sqlx::Error::PoolClosed,
        };
        let msg = err.to_string();
        assert!(msg.contains("transaction error: record not found"));
        assert!(msg.contains("rollback error:"));
    }

    #[test]
    fn test_already_exists_is_constraint_violation() {
        let err = StoreError::AlreadyExists;
        assert!(err.is_constraint_violation());
        assert!(!err.is_not_found());

        // Still recognized when raised inside a transaction.
        let wrapped = StoreError::Transaction {
            cause: Box::new(StoreError::AlreadyExists),
        };
        assert!(wrapped.is_constraint_violation());
    }

    #[test]
    fn test_plain_database_error_is_not_not_found() {
        let err = StoreError::Database(sqlx::Error::PoolClosed);
        assert!(!err.is_not_found());
        assert!(!err.is_constraint_violation());
    }
}
