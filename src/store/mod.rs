//! Ledger store
//!
//! The store facade is split into two narrow capabilities so test doubles can
//! implement either independently:
//!
//! - [`Querier`] - the single-statement CRUD operations
//! - [`TransferStore`] - the one composite operation, [`TransferStore::transfer_tx`]
//!
//! [`Store`] combines both and is what the HTTP layer depends on. [`SqlStore`]
//! is the PostgreSQL implementation; [`mem::MemStore`] is an in-process
//! double used by handler tests.

pub mod error;
pub mod mem;
pub mod models;
pub mod queries;
pub mod transfer;
mod tx;

use async_trait::async_trait;
use sqlx::PgPool;

pub use error::StoreError;
pub use models::{Account, Entry, Transfer, User};
pub use transfer::{TransferTxParams, TransferTxResult};

/// Parameters for creating a user. The password is already hashed; the store
/// never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}

/// Plain per-row operations.
#[async_trait]
pub trait Querier: Send + Sync {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError>;
    async fn get_user(&self, username: &str) -> Result<User, StoreError>;

    async fn create_account(
        &self,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, StoreError>;
    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;
    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, StoreError>;

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError>;
    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError>;
}

/// The composite transfer operation.
#[async_trait]
pub trait TransferStore: Send + Sync {
    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferTxResult, StoreError>;
}

/// Full store capability: CRUD plus transfers.
pub trait Store: Querier + TransferStore {}
impl<T: Querier + TransferStore> Store for T {}

/// PostgreSQL-backed store. Cheap to clone; all state lives in the pool.
#[derive(Clone)]
pub struct SqlStore {
    pub(crate) pool: PgPool,
}

impl SqlStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Querier for SqlStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let user = queries::UserQueries::create(
            &self.pool,
            &params.username,
            &params.hashed_password,
            &params.full_name,
            &params.email,
        )
        .await?;
        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        let user = queries::UserQueries::get(&self.pool, username).await?;
        Ok(user)
    }

    async fn create_account(
        &self,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, StoreError> {
        let account = queries::AccountQueries::create(&self.pool, owner, balance, currency).await?;
        Ok(account)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        let account = queries::AccountQueries::get(&self.pool, id).await?;
        Ok(account)
    }

    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, StoreError> {
        let accounts =
            queries::AccountQueries::list_by_owner(&self.pool, owner, limit, offset).await?;
        Ok(accounts)
    }

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError> {
        let entry = queries::EntryQueries::get(&self.pool, id).await?;
        Ok(entry)
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError> {
        let transfer = queries::TransferQueries::get(&self.pool, id).await?;
        Ok(transfer)
    }
}
