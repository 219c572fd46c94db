//! Password hashing using Argon2id
//!
//! Hashes are stored in PHC string format, so each one carries its own salt
//! and cost parameters. Verification reads them back from the stored string,
//! so hashes made under an older cost setting still verify.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};

/// Cost parameters for new password hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHashParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 2)
    pub time_cost: u32,
    /// Parallelism degree (default: 1)
    pub parallelism: u32,
}

impl Default for PasswordHashParams {
    fn default() -> Self {
        Self {
            memory_cost: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordHashParams {
    /// Create params with specific values
    pub fn with_values(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    fn hasher(&self) -> BudgetResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| BudgetError::Hashing(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash a plaintext password with a fresh random salt
pub fn hash_password(password: &str, params: &PasswordHashParams) -> BudgetResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = params
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BudgetError::Hashing(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash string
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash is
/// malformed.
pub fn verify_password(password: &str, stored_hash: &str) -> BudgetResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| BudgetError::Hashing(format!("Stored hash is malformed: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(BudgetError::Hashing(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Check a password against a stored hash, or burn one hash at `params` when
/// there is no stored hash
///
/// A missing account then costs as much as a wrong password and always
/// gives `Ok(false)`.
pub fn verify_password_or_dummy(
    password: &str,
    stored_hash: Option<&str>,
    params: &PasswordHashParams,
) -> BudgetResult<bool> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let _ = hash_password(password, params);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> PasswordHashParams {
        PasswordHashParams::with_values(8, 1, 1)
    }

    #[test]
    fn test_hash_is_phc_string() {
        let hash = hash_password("hunter2", &fast_params()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("hunter2", &fast_params()).unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("hunter2", &fast_params()).unwrap();
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let hash1 = hash_password("same", &fast_params()).unwrap();
        let hash2 = hash_password("same", &fast_params()).unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        let hash = hash_password("pw", &PasswordHashParams::with_values(16, 2, 1)).unwrap();
        assert!(hash.contains("m=16,t=2,p=1"));
        assert!(verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_verify_or_dummy() {
        let hash = hash_password("pw", &fast_params()).unwrap();

        assert!(verify_password_or_dummy("pw", Some(&hash), &fast_params()).unwrap());
        assert!(!verify_password_or_dummy("nope", Some(&hash), &fast_params()).unwrap());
        assert!(!verify_password_or_dummy("pw", None, &fast_params()).unwrap());
        assert!(!verify_password_or_dummy("pw", None, &PasswordHashParams::with_values(0, 0, 0)).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let err = verify_password("pw", "not-a-hash").unwrap_err();
        assert!(matches!(err, BudgetError::Hashing(_)));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let err = hash_password("pw", &PasswordHashParams::with_values(0, 0, 0)).unwrap_err();
        assert!(matches!(err, BudgetError::Hashing(_)));
    }
}
