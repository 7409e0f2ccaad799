//! Password hashing and verification.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use roster_config::HashingConfig;
use tokio::task;

use crate::types::HashingError;

const DECOY_PASSWORD: &str = "roster-decoy-password";

/// Argon2id hasher configured with the process-wide cost parameters.
///
/// Digests are PHC strings, so verification reads the parameters and salt back out of the
/// digest and keeps working after the configured cost changes.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    decoy: String,
}

impl PasswordHasher {
    pub fn new(config: &HashingConfig) -> Result<Self, HashingError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let salt = SaltString::generate(&mut OsRng);
        let decoy = argon2
            .hash_password(DECOY_PASSWORD.as_bytes(), &salt)?
            .to_string();

        Ok(Self { argon2, decoy })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(digest.to_string())
    }

    /// Check a plaintext password against a stored digest. Malformed digests never match.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend the same work as a real verification when there is no digest to check.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, &self.decoy);
    }

    /// [`Self::hash`] on the blocking pool, keeping async workers free.
    pub async fn hash_blocking(&self, password: &str) -> Result<String, HashingError> {
        let hasher = self.clone();
        let password = password.to_owned();
        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| HashingError(err.to_string()))?
    }

    /// [`Self::verify`] on the blocking pool. A panicked or cancelled check never matches.
    pub async fn verify_blocking(&self, password: &str, digest: &str) -> bool {
        let hasher = self.clone();
        let password = password.to_owned();
        let digest = digest.to_owned();
        task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .unwrap_or(false)
    }

    /// [`Self::verify_decoy`] on the blocking pool.
    pub async fn verify_decoy_blocking(&self, password: &str) {
        let hasher = self.clone();
        let password = password.to_owned();
        let _ = task::spawn_blocking(move || hasher.verify_decoy(&password)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::new(&HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let digest = hasher.hash("test_password_123").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert_ne!(digest, "test_password_123");
        assert!(hasher.verify("test_password_123", &digest));
        assert!(!hasher.verify("wrong_password", &digest));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = cheap_hasher();
        let first = hasher.hash("pw").unwrap();
        let second = hasher.hash("pw").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("pw", &first));
        assert!(hasher.verify("pw", &second));
    }

    #[test]
    fn test_malformed_digest_is_rejected() {
        let hasher = cheap_hasher();

        assert!(!hasher.verify("pw", ""));
        assert!(!hasher.verify("pw", "pw"));
        assert!(!hasher.verify("pw", "$argon2id$garbage"));
    }

    #[test]
    fn test_digest_parameters_survive_config_changes() {
        let old = cheap_hasher();
        let digest = old.hash("pw").unwrap();

        let stronger = PasswordHasher::new(&HashingConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(stronger.verify("pw", &digest));
    }

    #[test]
    fn test_invalid_parameters_are_reported() {
        let result = PasswordHasher::new(&HashingConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_decoy_verification_does_not_panic() {
        cheap_hasher().verify_decoy("anything");
    }

    #[tokio::test]
    async fn test_blocking_variants_match_inline_results() {
        let hasher = cheap_hasher();
        let digest = hasher.hash_blocking("pw").await.unwrap();

        assert!(hasher.verify("pw", &digest));
        assert!(hasher.verify_blocking("pw", &digest).await);
        assert!(!hasher.verify_blocking("wrong", &digest).await);
        assert!(!hasher.verify_blocking("pw", "not-a-digest").await);
        hasher.verify_decoy_blocking("anything").await;
    }

    #[tokio::test]
    async fn test_hashing_yields_to_other_tasks() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let hasher = cheap_hasher();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        // Single-threaded runtime: the spawned task only runs if hashing gives up the thread.
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        hasher.hash_blocking("pw").await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }
}
