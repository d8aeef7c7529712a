//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::health::HealthData;
use crate::api::types::{
    CreateAccountRequest, CreateTransferRequest, CreateUserRequest, LoginRequest, LoginResponse,
    UserResponse,
};
use crate::store::{Account, Entry, Transfer, TransferTxResult};

/// Bearer access-token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /api/v1/users/login"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Corebank Ledger API",
        version = "0.1.0",
        description = "Accounts, signed ledger entries and atomic money transfers.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::login_user,
        crate::api::handlers::accounts::create_account,
        crate::api::handlers::accounts::get_account,
        crate::api::handlers::accounts::list_accounts,
        crate::api::handlers::transfers::create_transfer,
    ),
    components(
        schemas(
            HealthData,
            CreateUserRequest,
            UserResponse,
            LoginRequest,
            LoginResponse,
            CreateAccountRequest,
            CreateTransferRequest,
            Account,
            Entry,
            Transfer,
            TransferTxResult,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration and login"),
        (name = "Accounts", description = "Account management (auth required)"),
        (name = "Transfers", description = "Atomic money movement (auth required)"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
