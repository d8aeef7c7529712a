//! Password hashing with Argon2

use anyhow::{Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password. Each call produces a different hash because the
/// salt is random.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<()> {
    let parsed = PasswordHash::new(hashed).map_err(|e| anyhow!("invalid hash format: {}", e))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| anyhow!("password mismatch"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::random::random_string;

    #[test]
    fn test_hash_and_verify() {
        let password = random_string(12);
        let hashed = hash_password(&password).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(&password, &hashed).is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hashed = hash_password(&random_string(12)).unwrap();
        assert!(verify_password(&random_string(12), &hashed).is_err());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let password = random_string(12);
        let first = hash_password(&password).unwrap();
        let second = hash_password(&password).unwrap();
        assert_ne!(first, second);
    }
}
