use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::helpers::{ErrorReply, check_request, store_error_reply, unauthorized};
use crate::api::state::AppState;
use crate::api::types::{
    ApiResponse, CreateUserRequest, LoginRequest, LoginResponse, UserResponse, error_codes,
};
use crate::store::CreateUserParams;
use crate::util::password;

/// Register a new user
///
/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Username or email already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ErrorReply> {
    check_request(&req)?;

    let hashed_password = password::hash_password(&req.password).map_err(|e| {
        tracing::error!("password hashing failed: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(
                error_codes::INTERNAL_ERROR,
                "internal error",
            )),
        )
    })?;

    let user = state
        .store
        .create_user(CreateUserParams {
            username: req.username,
            hashed_password,
            full_name: req.full_name,
            email: req.email,
        })
        .await
        .map_err(|e| store_error_reply(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse::from(user))),
    ))
}

/// Login and obtain an access token
///
/// POST /api/v1/users/login
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown user"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), ErrorReply> {
    check_request(&req)?;

    let user = state
        .store
        .get_user(&req.username)
        .await
        .map_err(|e| store_error_reply(&e))?;

    password::verify_password(&req.password, &user.hashed_password)
        .map_err(|_| unauthorized("wrong username or password"))?;

    let access_token = state
        .token
        .create_token(&user.username, state.access_token_ttl)
        .map_err(|e| {
            tracing::error!("token issuance failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(
                    error_codes::INTERNAL_ERROR,
                    "internal error",
                )),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(LoginResponse {
            access_token,
            user: UserResponse::from(user),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem::MemStore;
    use crate::token::JwtMaker;
    use crate::util::random::random_string;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(MemStore::new()),
            Arc::new(JwtMaker::new(random_string(32)).unwrap()),
            chrono::Duration::minutes(15),
        ))
    }

    fn user_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "alice1".to_string(),
            password: "secret123".to_string(),
            full_name: "Alice Smith".to_string(),
            email: "alice@email.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hides_password() {
        let state = test_state();
        let (status, Json(body)) = create_user(State(state), Json(user_request()))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let user = body.data.unwrap();
        assert_eq!(user.username, "alice1");
        // Serialized response must not leak anything password-shaped.
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password\":"));
        assert!(!json.contains("secret123"));
    }

    #[tokio::test]
    async fn test_create_user_rejects_short_password() {
        let state = test_state();
        let mut req = user_request();
        req.password = "abc".to_string();
        let err = create_user(State(state), Json(req)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_user_twice_is_forbidden() {
        let state = test_state();
        create_user(State(state.clone()), Json(user_request()))
            .await
            .unwrap();

        let err = create_user(State(state), Json(user_request()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
        assert_eq!(err.1.code, error_codes::ALREADY_EXISTS);
    }

    #[tokio::test]
    async fn test_login_roundtrip() {
        let state = test_state();
        create_user(State(state.clone()), Json(user_request()))
            .await
            .unwrap();

        let (status, Json(body)) = login_user(
            State(state.clone()),
            Json(LoginRequest {
                username: "alice1".to_string(),
                password: "secret123".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::OK);
        let login = body.data.unwrap();
        let claims = state.token.verify_token(&login.access_token).unwrap();
        assert_eq!(claims.sub, "alice1");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = test_state();
        create_user(State(state.clone()), Json(user_request()))
            .await
            .unwrap();

        let err = login_user(
            State(state),
            Json(LoginRequest {
                username: "alice1".to_string(),
                password: "wrong-password".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let state = test_state();
        let err = login_user(
            State(state),
            Json(LoginRequest {
                username: "nobody".to_string(),
                password: "secret123".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
