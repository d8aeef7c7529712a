use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::helpers::{ErrorReply, bad_request, check_request, store_error_reply, unauthorized};
use crate::api::state::AppState;
use crate::api::types::{ApiResponse, CreateTransferRequest, error_codes};
use crate::store::{Account, TransferTxParams, TransferTxResult};
use crate::token::Claims;

/// Move money between two accounts
///
/// POST /api/v1/transfers
///
/// Both accounts must exist and be denominated in the request currency, and
/// the caller must own the source account. The transfer itself runs as one
/// atomic database transaction.
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer applied", body = ApiResponse<TransferTxResult>),
        (status = 400, description = "Invalid input or currency mismatch"),
        (status = 401, description = "Caller does not own the source account"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "Transfers"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    axum::Extension(claims): axum::Extension<Claims>,
    Json(req): Json<CreateTransferRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransferTxResult>>), ErrorReply> {
    check_request(&req)?;

    // The engine itself does not care, so self-transfers are rejected here at
    // the validation boundary.
    if req.from_account_id == req.to_account_id {
        return Err(bad_request("cannot transfer to the same account"));
    }

    let from_account = valid_account(&state, req.from_account_id, &req.currency).await?;
    if from_account.owner != claims.sub {
        return Err(unauthorized("you do not own the source account"));
    }
    valid_account(&state, req.to_account_id, &req.currency).await?;

    let result = state
        .store
        .transfer_tx(TransferTxParams {
            from_account_id: req.from_account_id,
            to_account_id: req.to_account_id,
            amount: req.amount,
        })
        .await
        .map_err(|e| store_error_reply(&e))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(result))))
}

/// Fetch the account and check it is denominated in `currency`. Missing
/// accounts map to 404, a currency mismatch to 400.
async fn valid_account(
    state: &AppState,
    account_id: i64,
    currency: &str,
) -> Result<Account, ErrorReply> {
    let account = state
        .store
        .get_account(account_id)
        .await
        .map_err(|e| store_error_reply(&e))?;

    if account.currency != currency {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::CURRENCY_MISMATCH,
                format!(
                    "account [{}] currency mismatch: got {} but expected {}",
                    account_id, currency, account.currency
                ),
            )),
        ));
    }

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem::MemStore;
    use crate::token::JwtMaker;
    use crate::util::random::random_string;

    fn claims(username: &str) -> Claims {
        Claims {
            sub: username.to_string(),
            exp: usize::MAX,
            iat: 0,
        }
    }

    fn test_state() -> (Arc<AppState>, Arc<MemStore>) {
        let store = Arc::new(MemStore::new());
        let state = Arc::new(AppState::new(
            store.clone(),
            Arc::new(JwtMaker::new(random_string(32)).unwrap()),
            chrono::Duration::minutes(15),
        ));
        (state, store)
    }

    fn request(from: i64, to: i64, amount: i64, currency: &str) -> CreateTransferRequest {
        CreateTransferRequest {
            from_account_id: from,
            to_account_id: to,
            amount,
            currency: currency.to_string(),
        }
    }

    #[tokio::test]
    async fn test_transfer_scenario() {
        // X starts at 1000, Y at 500, both ILS; moving 200 leaves 800/700.
        let (state, store) = test_state();
        let x = store.seed_account("alice", 1000, "ILS").await;
        let y = store.seed_account("bob", 500, "ILS").await;

        let (status, Json(body)) = create_transfer(
            State(state),
            axum::Extension(claims("alice")),
            Json(request(x.id, y.id, 200, "ILS")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::OK);
        let result = body.data.unwrap();
        assert_eq!(result.from_account.balance, 800);
        assert_eq!(result.to_account.balance, 700);
        assert_eq!(result.from_entry.amount, -200);
        assert_eq!(result.to_entry.amount, 200);
        assert_eq!(result.transfer.amount, 200);
    }

    #[tokio::test]
    async fn test_transfer_missing_account_is_404() {
        let (state, store) = test_state();
        let x = store.seed_account("alice", 1000, "USD").await;

        let err = create_transfer(
            State(state),
            axum::Extension(claims("alice")),
            Json(request(x.id, 999, 100, "USD")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_transfer_currency_mismatch_is_400() {
        let (state, store) = test_state();
        let x = store.seed_account("alice", 1000, "USD").await;
        let y = store.seed_account("bob", 500, "EUR").await;

        let err = create_transfer(
            State(state),
            axum::Extension(claims("alice")),
            Json(request(x.id, y.id, 100, "USD")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transfer_requires_source_ownership() {
        let (state, store) = test_state();
        let x = store.seed_account("alice", 1000, "USD").await;
        let y = store.seed_account("bob", 500, "USD").await;

        let err = create_transfer(
            State(state),
            axum::Extension(claims("bob")),
            Json(request(x.id, y.id, 100, "USD")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_transfer_to_self_is_rejected() {
        let (state, store) = test_state();
        let x = store.seed_account("alice", 1000, "USD").await;

        let err = create_transfer(
            State(state),
            axum::Extension(claims("alice")),
            Json(request(x.id, x.id, 100, "USD")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transfer_rejects_non_positive_amount() {
        let (state, store) = test_state();
        let x = store.seed_account("alice", 1000, "USD").await;
        let y = store.seed_account("bob", 500, "USD").await;

        let err = create_transfer(
            State(state),
            axum::Extension(claims("alice")),
            Json(request(x.id, y.id, 0, "USD")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
