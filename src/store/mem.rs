//! In-memory store double
//!
//! Implements the full [`Store`](super::Store) surface over a mutex-guarded
//! map so handler and facade tests run without PostgreSQL. A transfer
//! validates both accounts before touching any state, so the all-or-nothing
//! contract of the real engine holds here too.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::error::StoreError;
use super::models::{Account, Entry, Transfer, User};
use super::transfer::{TransferTxParams, TransferTxResult};
use super::{CreateUserParams, Querier, TransferStore};

#[derive(Default)]
struct MemState {
    accounts: HashMap<i64, Account>,
    entries: HashMap<i64, Entry>,
    transfers: HashMap<i64, Transfer>,
    users: HashMap<String, User>,
    next_account_id: i64,
    next_entry_id: i64,
    next_transfer_id: i64,
}

/// In-process store for tests.
#[derive(Default)]
pub struct MemStore {
    state: Mutex<MemState>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing the ownership and uniqueness
    /// checks of `create_account`. Returns the persisted account.
    pub async fn seed_account(&self, owner: &str, balance: i64, currency: &str) -> Account {
        let mut state = self.state.lock().await;
        state.next_account_id += 1;
        let account = Account {
            id: state.next_account_id,
            owner: owner.to_string(),
            balance,
            currency: currency.to_string(),
            created_at: Utc::now(),
        };
        state.accounts.insert(account.id, account.clone());
        account
    }
}

#[async_trait]
impl Querier for MemStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        if state.users.contains_key(&params.username)
            || state.users.values().any(|u| u.email == params.email)
        {
            return Err(StoreError::AlreadyExists);
        }
        let user = User {
            username: params.username.clone(),
            hashed_password: params.hashed_password,
            full_name: params.full_name,
            email: params.email,
            password_changed_at: Utc::now(),
            created_at: Utc::now(),
        };
        state.users.insert(params.username, user.clone());
        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        let state = self.state.lock().await;
        state.users.get(username).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_account(
        &self,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, StoreError> {
        // One account per currency per owner, as the unique index enforces.
        {
            let state = self.state.lock().await;
            if state
                .accounts
                .values()
                .any(|a| a.owner == owner && a.currency == currency)
            {
                return Err(StoreError::AlreadyExists);
            }
        }
        Ok(self.seed_account(owner, balance, currency).await)
    }

    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        let state = self.state.lock().await;
        state.accounts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_accounts(
        &self,
        owner: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, StoreError> {
        let state = self.state.lock().await;
        let mut accounts: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| a.owner == owner)
            .cloned()
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get_entry(&self, id: i64) -> Result<Entry, StoreError> {
        let state = self.state.lock().await;
        state.entries.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_transfer(&self, id: i64) -> Result<Transfer, StoreError> {
        let state = self.state.lock().await;
        state.transfers.get(&id).cloned().ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl TransferStore for MemStore {
    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferTxResult, StoreError> {
        let mut state = self.state.lock().await;

        // Validate before mutating so a failure leaves no trace, mirroring
        // the rollback behavior of the SQL engine.
        if !state.accounts.contains_key(&params.from_account_id)
            || !state.accounts.contains_key(&params.to_account_id)
        {
            return Err(StoreError::Transaction {
                cause: Box::new(StoreError::NotFound),
            });
        }

        let now = Utc::now();
        state.next_transfer_id += 1;
        let transfer = Transfer {
            id: state.next_transfer_id,
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.amount,
            created_at: now,
        };
        state.transfers.insert(transfer.id, transfer.clone());

        state.next_entry_id += 1;
        let from_entry = Entry {
            id: state.next_entry_id,
            account_id: params.from_account_id,
            amount: -params.amount,
            created_at: now,
        };
        state.entries.insert(from_entry.id, from_entry.clone());

        state.next_entry_id += 1;
        let to_entry = Entry {
            id: state.next_entry_id,
            account_id: params.to_account_id,
            amount: params.amount,
            created_at: now,
        };
        state.entries.insert(to_entry.id, to_entry.clone());

        let from_account = {
            let account = state
                .accounts
                .get_mut(&params.from_account_id)
                .ok_or(StoreError::NotFound)?;
            account.balance -= params.amount;
            account.clone()
        };
        let to_account = {
            let account = state
                .accounts
                .get_mut(&params.to_account_id)
                .ok_or(StoreError::NotFound)?;
            account.balance += params.amount;
            account.clone()
        };

        Ok(TransferTxResult {
            transfer,
            from_account,
            to_account,
            from_entry,
            to_entry,
        })
    }
}
