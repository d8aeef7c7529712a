//! corebank - a minimal core-banking ledger service
//!
//! Accounts hold balances in minor currency units; every movement of money is
//! an atomic transfer that writes one transfer record, two signed entries and
//! two locked balance updates in a single PostgreSQL transaction.
//!
//! # Modules
//!
//! - [`store`] - ledger store: models, repository queries, transaction runner
//!   and the transfer engine
//! - [`db`] - PostgreSQL pool management and schema bootstrap
//! - [`api`] - axum HTTP layer (validation, auth, response shaping)
//! - [`token`] - access token issuance/verification
//! - [`util`] - password hashing, currencies, random test data
//! - [`config`] / [`logging`] - process configuration and tracing setup

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod store;
pub mod token;
pub mod util;

// Convenient re-exports at crate root
pub use store::{
    Account, Entry, Querier, SqlStore, Store, StoreError, Transfer, TransferStore,
    TransferTxParams, TransferTxResult, User,
};
