//! Schema bootstrap
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS` statements executed at startup.
//! Order matters: accounts reference users, entries and transfers reference
//! accounts.

use anyhow::{Context, Result};
use sqlx::PgPool;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username            VARCHAR PRIMARY KEY,
    hashed_password     VARCHAR NOT NULL,
    full_name           VARCHAR NOT NULL,
    email               VARCHAR UNIQUE NOT NULL,
    password_changed_at TIMESTAMPTZ NOT NULL DEFAULT '0001-01-01 00:00:00Z',
    created_at          TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id         BIGSERIAL PRIMARY KEY,
    owner      VARCHAR NOT NULL REFERENCES users (username),
    balance    BIGINT NOT NULL,
    currency   VARCHAR NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

// One account per currency per owner
const CREATE_ACCOUNTS_OWNER_CURRENCY_IDX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS accounts_owner_currency_idx
    ON accounts (owner, currency)
"#;

const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id         BIGSERIAL PRIMARY KEY,
    account_id BIGINT NOT NULL REFERENCES accounts (id),
    amount     BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_ENTRIES_ACCOUNT_IDX: &str = r#"
CREATE INDEX IF NOT EXISTS entries_account_id_idx ON entries (account_id)
"#;

const CREATE_TRANSFERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS transfers (
    id              BIGSERIAL PRIMARY KEY,
    from_account_id BIGINT NOT NULL REFERENCES accounts (id),
    to_account_id   BIGINT NOT NULL REFERENCES accounts (id),
    amount          BIGINT NOT NULL CHECK (amount > 0),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_TRANSFERS_FROM_IDX: &str = r#"
CREATE INDEX IF NOT EXISTS transfers_from_account_id_idx ON transfers (from_account_id)
"#;

const CREATE_TRANSFERS_TO_IDX: &str = r#"
CREATE INDEX IF NOT EXISTS transfers_to_account_id_idx ON transfers (to_account_id)
"#;

/// Initialize the ledger schema.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    tracing::info!("Initializing ledger schema...");

    let statements = [
        ("users table", CREATE_USERS_TABLE),
        ("accounts table", CREATE_ACCOUNTS_TABLE),
        ("accounts owner/currency index", CREATE_ACCOUNTS_OWNER_CURRENCY_IDX),
        ("entries table", CREATE_ENTRIES_TABLE),
        ("entries account index", CREATE_ENTRIES_ACCOUNT_IDX),
        ("transfers table", CREATE_TRANSFERS_TABLE),
        ("transfers from index", CREATE_TRANSFERS_FROM_IDX),
        ("transfers to index", CREATE_TRANSFERS_TO_IDX),
    ];

    for (name, sql) in statements {
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create {name}"))?;
    }

    tracing::info!("Ledger schema initialized");
    Ok(())
}
