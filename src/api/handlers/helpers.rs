//! Shared handler plumbing: error mapping and validation shorthand

use axum::{Json, http::StatusCode};
use validator::Validate;

use crate::api::types::{ApiResponse, error_codes};
use crate::store::StoreError;

pub type ErrorReply = (StatusCode, Json<ApiResponse<()>>);

/// Map a store error onto the HTTP surface: missing rows are 404, constraint
/// violations 403 (duplicate user/account, unknown owner), everything else a
/// plain 500. The error text is logged, not echoed to the client.
pub fn store_error_reply(err: &StoreError) -> ErrorReply {
    if err.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                error_codes::NOT_FOUND,
                "record not found",
            )),
        );
    }
    if err.is_constraint_violation() {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error(
                error_codes::ALREADY_EXISTS,
                "conflicts with an existing record",
            )),
        );
    }
    tracing::error!("store error: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error(
            error_codes::INTERNAL_ERROR,
            "internal error",
        )),
    )
}

/// Run `validator` checks on a request body, mapping failures to 400.
pub fn check_request<T: Validate>(req: &T) -> Result<(), ErrorReply> {
    req.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_PARAMETER,
                e.to_string(),
            )),
        )
    })
}

pub fn bad_request(msg: impl Into<String>) -> ErrorReply {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, msg)),
    )
}

pub fn unauthorized(msg: impl Into<String>) -> ErrorReply {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(error_codes::NOT_AUTHORIZED, msg)),
    )
}
