//! Transaction runner
//!
//! `exec_tx` is the only place a database transaction is opened or closed.
//! The unit-of-work gets the transaction-scoped connection and must issue
//! every statement through it; nothing it writes becomes durable unless the
//! final commit succeeds.

use futures::future::BoxFuture;
use sqlx::PgConnection;

use super::SqlStore;
use super::error::StoreError;

impl SqlStore {
    /// Execute `op` inside a single database transaction.
    ///
    /// Commits when `op` returns `Ok`, rolls back when it returns `Err`. A
    /// failed rollback keeps both the original cause and the rollback error.
    /// The runner holds no state between calls; concurrent callers each get
    /// an independent transaction.
    ///
    /// If the returned future is dropped before completion (caller timeout or
    /// cancellation) the open transaction is rolled back when the sqlx
    /// `Transaction` guard drops, so a cancelled call can never commit.
    pub(crate) async fn exec_tx<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, StoreError>> + Send,
    {
        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        match op(&mut *tx).await {
            Ok(value) => {
                // Commit failures surface as-is
                tx.commit().await.map_err(StoreError::from)?;
                Ok(value)
            }
            Err(cause) => match tx.rollback().await {
                Ok(()) => Err(StoreError::Transaction {
                    cause: Box::new(cause),
                }),
                Err(rollback) => Err(StoreError::TransactionRollback {
                    cause: Box::new(cause),
                    rollback,
                }),
            },
        }
    }
}
