//! Password hashing and verification utilities.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use relay_config::PasswordHashConfig;

use crate::types::RelayError;

/// Argon2id hasher with a fixed work factor.
///
/// Each hash gets a fresh random salt, embedded in the PHC output together
/// with the parameters. Hashing runs on the blocking pool so it never stalls
/// the async executor.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, RelayError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| RelayError::internal(format!("invalid password hash parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password
    pub async fn hash(&self, password: String) -> Result<String, RelayError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(|e| RelayError::internal(format!("password hashing task failed: {e}")))?
    }

    /// Verify a password against a stored hash.
    ///
    /// `Ok(false)` means the password does not match. A stored hash that cannot
    /// be parsed is an internal fault, not a mismatch.
    pub async fn verify(&self, password: String, stored_hash: String) -> Result<bool, RelayError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &stored_hash))
            .await
            .map_err(|e| RelayError::internal(format!("password verification task failed: {e}")))?
    }

    pub fn hash_blocking(&self, password: &str) -> Result<String, RelayError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| RelayError::internal(format!("password hashing failed: {e}")))?
            .to_string();

        Ok(password_hash)
    }

    pub fn verify_blocking(&self, password: &str, stored_hash: &str) -> Result<bool, RelayError> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| RelayError::internal(format!("stored password hash is malformed: {e}")))?;

        // The output comparison inside argon2 is constant time.
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(RelayError::internal(format!(
                "password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> CredentialHasher {
        CredentialHasher::new(&PasswordHashConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_password_hashing() {
        let hasher = cheap_hasher();
        let hash = hasher.hash_blocking("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_blocking("test_password_123", &hash).unwrap());
        assert!(!hasher.verify_blocking("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let hasher = cheap_hasher();
        let first = hasher.hash_blocking("same").unwrap();
        let second = hasher.hash_blocking("same").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify_blocking("same", &first).unwrap());
        assert!(hasher.verify_blocking("same", &second).unwrap());
    }

    #[test]
    fn test_verification_uses_parameters_from_hash() {
        let old = cheap_hasher();
        let hash = old.hash_blocking("carried-over").unwrap();

        let stronger = CredentialHasher::new(&PasswordHashConfig {
            memory_kib: 128,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(stronger.verify_blocking("carried-over", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let hasher = cheap_hasher();
        let err = hasher.verify_blocking("anything", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, RelayError::Internal(_)));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let result = CredentialHasher::new(&PasswordHashConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("pw1".to_string()).await.unwrap();
        assert!(hasher.verify("pw1".to_string(), hash.clone()).await.unwrap());
        assert!(!hasher.verify("pw2".to_string(), hash).await.unwrap());
    }
}
