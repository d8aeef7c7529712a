//! Access token issuance and verification

use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Minimum HMAC secret length; anything shorter is trivially brute-forced.
const MIN_SECRET_SIZE: usize = 32;

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated principal
    pub sub: String,
    /// Expiration (UTC timestamp)
    pub exp: usize,
    /// Issued at (UTC timestamp)
    pub iat: usize,
}

/// Anything that can mint and verify access tokens. The HTTP layer depends on
/// this trait, not on a concrete signer.
pub trait Maker: Send + Sync {
    fn create_token(&self, username: &str, ttl: Duration) -> Result<String>;
    fn verify_token(&self, token: &str) -> Result<Claims>;
}

/// HS256 JWT maker
pub struct JwtMaker {
    secret: String,
}

impl JwtMaker {
    pub fn new(secret: String) -> Result<Self> {
        if secret.len() < MIN_SECRET_SIZE {
            return Err(anyhow!(
                "invalid secret size: must be at least {} characters",
                MIN_SECRET_SIZE
            ));
        }
        Ok(Self { secret })
    }
}

impl Maker for JwtMaker {
    fn create_token(&self, username: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| anyhow!("token expiration overflows"))?;

        let claims = Claims {
            sub: username.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| anyhow!("failed to sign token: {}", e))
    }

    fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::random::{random_owner, random_string};

    fn maker() -> JwtMaker {
        JwtMaker::new(random_string(32)).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(JwtMaker::new("too-short".to_string()).is_err());
    }

    #[test]
    fn test_token_roundtrip() {
        let maker = maker();
        let username = random_owner();

        let token = maker.create_token(&username, Duration::minutes(15)).unwrap();
        let claims = maker.verify_token(&token).unwrap();

        assert_eq!(claims.sub, username);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let maker = maker();
        let token = maker.create_token("alice", Duration::minutes(-1)).unwrap();
        assert!(maker.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = maker().create_token("alice", Duration::minutes(15)).unwrap();
        assert!(maker().verify_token(&token).is_err());
    }
}
