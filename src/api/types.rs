//! API request/response types and error codes
//!
//! All responses use the unified [`ApiResponse`] wrapper:
//! - code: 0 = success, non-zero = error code
//! - msg: short message description
//! - data: actual data (success) or null (error)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::store::User;
use crate::util::currency;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const CURRENCY_MISMATCH: i32 = 1002;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const NOT_AUTHORIZED: i32 = 2003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;
    pub const ALREADY_EXISTS: i32 = 4009;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Custom validator: currency must be one of the supported codes.
pub fn validate_currency(code: &str) -> Result<(), ValidationError> {
    if currency::is_supported(code) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported currency"))
    }
}

/// Custom validator: usernames are ASCII alphanumeric.
pub fn validate_alphanum(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("must be alphanumeric"))
    }
}

// ============================================================================
// User DTOs
// ============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "alice")]
    #[validate(custom(function = validate_alphanum))]
    pub username: String,
    #[schema(example = "secret123")]
    #[validate(length(min = 6))]
    pub password: String,
    #[schema(example = "Alice Smith")]
    #[validate(length(min = 1))]
    pub full_name: String,
    #[schema(example = "alice@email.com")]
    #[validate(email)]
    pub email: String,
}

/// User as exposed over the API - never includes the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            password_changed_at: user.password_changed_at,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    #[validate(custom(function = validate_alphanum))]
    pub username: String,
    #[schema(example = "secret123")]
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

// ============================================================================
// Account DTOs
// ============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[schema(example = "USD")]
    #[validate(custom(function = validate_currency))]
    pub currency: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListAccountsQuery {
    #[validate(range(min = 1))]
    pub page_id: i64,
    #[validate(range(min = 5, max = 10))]
    pub page_size: i64,
}

// ============================================================================
// Transfer DTOs
// ============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransferRequest {
    #[schema(example = 1)]
    #[validate(range(min = 1))]
    pub from_account_id: i64,
    #[schema(example = 2)]
    #[validate(range(min = 1))]
    pub to_account_id: i64,
    /// Positive amount in minor currency units
    #[schema(example = 200)]
    #[validate(range(min = 1))]
    pub amount: i64,
    /// Both accounts must be denominated in this currency
    #[schema(example = "USD")]
    #[validate(custom(function = validate_currency))]
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_validation() {
        let ok = CreateTransferRequest {
            from_account_id: 1,
            to_account_id: 2,
            amount: 100,
            currency: "USD".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_amount = CreateTransferRequest { amount: 0, ..ok };
        assert!(bad_amount.validate().is_err());

        let bad_currency = CreateTransferRequest {
            from_account_id: 1,
            to_account_id: 2,
            amount: 100,
            currency: "BTC".to_string(),
        };
        assert!(bad_currency.validate().is_err());
    }

    #[test]
    fn test_user_request_validation() {
        let ok = CreateUserRequest {
            username: "alice1".to_string(),
            password: "secret123".to_string(),
            full_name: "Alice".to_string(),
            email: "alice@email.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_username = CreateUserRequest {
            username: "not valid!".to_string(),
            password: "secret123".to_string(),
            full_name: "Alice".to_string(),
            email: "alice@email.com".to_string(),
        };
        assert!(bad_username.validate().is_err());

        let short_password = CreateUserRequest {
            username: "alice1".to_string(),
            password: "abc".to_string(),
            full_name: "Alice".to_string(),
            email: "alice@email.com".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        let query = ListAccountsQuery {
            page_id: 1,
            page_size: 5,
        };
        assert!(query.validate().is_ok());

        let too_big = ListAccountsQuery {
            page_id: 1,
            page_size: 11,
        };
        assert!(too_big.validate().is_err());
    }
}
