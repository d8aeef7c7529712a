//! corebank - entry point
//!
//! Wires the pieces together: config, logging, PostgreSQL pool, ledger
//! schema, store, token maker, HTTP server. All dependencies are constructed
//! here and passed down explicitly; there are no process-wide singletons.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use corebank::api::{self, state::AppState};
use corebank::config::AppConfig;
use corebank::db::{Database, schema};
use corebank::logging::init_logging;
use corebank::store::SqlStore;
use corebank::token::JwtMaker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    let config = AppConfig::load(&env);

    // Guard must stay alive for the lifetime of the process
    let _log_guard = init_logging(&config);
    tracing::info!(env = %env, "corebank starting");

    let db = Database::connect(&config.postgres_url)
        .await
        .context("cannot connect to PostgreSQL")?;
    schema::init_schema(db.pool())
        .await
        .context("schema bootstrap failed")?;

    let store = Arc::new(SqlStore::new(db.pool().clone()));
    let token = Arc::new(JwtMaker::new(config.token.secret.clone()).context("invalid token secret")?);

    let state = Arc::new(AppState::new(
        store,
        token,
        Duration::minutes(config.token.access_token_minutes),
    ));

    api::run_server(&config.server.host, config.server.port, state).await
}
