use std::sync::Arc;

use chrono::Duration;

use crate::store::Store;
use crate::token::Maker;

/// Shared application state, injected into every handler.
///
/// Both the store and the token maker are held behind trait objects so tests
/// can swap in doubles without touching transaction mechanics.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub token: Arc<dyn Maker>,
    pub access_token_ttl: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, token: Arc<dyn Maker>, access_token_ttl: Duration) -> Self {
        Self {
            store,
            token,
            access_token_ttl,
        }
    }
}
