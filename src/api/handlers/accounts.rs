use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::helpers::{ErrorReply, check_request, store_error_reply, unauthorized};
use crate::api::state::AppState;
use crate::api::types::{ApiResponse, CreateAccountRequest, ListAccountsQuery};
use crate::store::Account;
use crate::token::Claims;

/// Open an account for the authenticated user
///
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<Account>),
        (status = 400, description = "Unsupported currency"),
        (status = 403, description = "Account in this currency already exists"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_token" = [])),
    tag = "Accounts"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Account>>), ErrorReply> {
    check_request(&req)?;

    // New accounts always start empty; balances only move through transfers.
    let account = state
        .store
        .create_account(&claims.sub, 0, &req.currency)
        .await
        .map_err(|e| store_error_reply(&e))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(account))))
}

/// Fetch one account by id
///
/// GET /api/v1/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = ApiResponse<Account>),
        (status = 404, description = "No such account"),
        (status = 401, description = "Account belongs to another user")
    ),
    security(("bearer_token" = [])),
    tag = "Accounts"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<Account>>), ErrorReply> {
    let account = state
        .store
        .get_account(id)
        .await
        .map_err(|e| store_error_reply(&e))?;

    if account.owner != claims.sub {
        return Err(unauthorized("account belongs to another user"));
    }

    Ok((StatusCode::OK, Json(ApiResponse::success(account))))
}

/// List the caller's accounts, paginated
///
/// GET /api/v1/accounts?page_id=1&page_size=5
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(
        ("page_id" = i64, Query, description = "1-based page number"),
        ("page_size" = i64, Query, description = "Rows per page, 5..=10")
    ),
    responses(
        (status = 200, description = "Accounts owned by the caller", body = ApiResponse<Vec<Account>>),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_token" = [])),
    tag = "Accounts"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Account>>>), ErrorReply> {
    check_request(&query)?;

    let accounts = state
        .store
        .list_accounts(
            &claims.sub,
            query.page_size,
            (query.page_id - 1) * query.page_size,
        )
        .await
        .map_err(|e| store_error_reply(&e))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(accounts))))
}
