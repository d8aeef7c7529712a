//! Single-statement repository operations
//!
//! Each query runs against any `PgExecutor`, so the same operation works on
//! the shared pool or on a transaction-scoped connection. Every statement
//! uses `RETURNING` so the caller always gets the persisted row back.

use sqlx::PgExecutor;

use super::models::{Account, Entry, Transfer, User};

/// Account CRUD
pub struct AccountQueries;

impl AccountQueries {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (owner, balance, currency)
               VALUES ($1, $2, $3)
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(owner)
        .bind(balance)
        .bind(currency)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    /// Read the account while taking a row lock that is held until the
    /// surrounding transaction commits or rolls back. Callers that intend to
    /// write the balance back must use this, never a plain `get`, or
    /// concurrent transfers lose updates.
    ///
    /// The lock is `FOR NO KEY UPDATE`, not `FOR UPDATE`: the transfer and
    /// entry inserts earlier in the same transaction take `FOR KEY SHARE` on
    /// these rows for their foreign-key checks, and a plain `FOR UPDATE` from
    /// a concurrent transfer conflicts with those, deadlocking two transfers
    /// before the ordered locking phase even starts. The balance update never
    /// touches a key column, so the weaker lock is sufficient.
    pub async fn get_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts WHERE id = $1
               FOR NO KEY UPDATE"#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    pub async fn update_balance<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        balance: i64,
    ) -> Result<Account, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET balance = $2
               WHERE id = $1
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(id)
        .bind(balance)
        .fetch_one(executor)
        .await
    }

    pub async fn list_by_owner<'e, E: PgExecutor<'e>>(
        executor: E,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at
               FROM accounts WHERE owner = $1
               ORDER BY id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
    }
}

/// Ledger entry operations. Entries are insert-only.
pub struct EntryQueries;

impl EntryQueries {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        account_id: i64,
        amount: i64,
    ) -> Result<Entry, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"INSERT INTO entries (account_id, amount)
               VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Entry, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"SELECT id, account_id, amount, created_at
               FROM entries WHERE id = $1"#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }
}

/// Transfer record operations. Transfers are insert-only.
pub struct TransferQueries;

impl TransferQueries {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<Transfer, sqlx::Error> {
        sqlx::query_as::<_, Transfer>(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Transfer, sqlx::Error> {
        sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1"#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }
}

/// User CRUD
pub struct UserQueries;

impl UserQueries {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        username: &str,
        hashed_password: &str,
        full_name: &str,
        email: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, hashed_password, full_name, email)
               VALUES ($1, $2, $3, $4)
               RETURNING username, hashed_password, full_name, email,
                         password_changed_at, created_at"#,
        )
        .bind(username)
        .bind(hashed_password)
        .bind(full_name)
        .bind(email)
        .fetch_one(executor)
        .await
    }

    pub async fn get<'e, E: PgExecutor<'e>>(
        executor: E,
        username: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT username, hashed_password, full_name, email,
                      password_changed_at, created_at
               FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_one(executor)
        .await
    }
}
