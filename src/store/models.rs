//! Persisted ledger records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Bank account. The balance is in minor currency units and is only ever
/// mutated inside a transfer transaction (or by an admin path outside this
/// service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    /// Minor currency units, signed
    pub balance: i64,
    /// Fixed at creation, e.g. "USD"
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// One signed balance movement for one account. Negative = debit,
/// positive = credit. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Record of intent to move `amount` (always positive) between two accounts.
/// Every transfer maps to exactly two entries whose amounts sum to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Registered user. `username` is the primary key; accounts reference it as
/// their owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
