use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// Defaults follow the OWASP recommendation for Argon2id
/// (19 MiB of memory, 2 iterations, 1 lane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashingParams {
    pub const MIN_MEMORY_KIB: u32 = 19 * 1024;
    pub const MIN_ITERATIONS: u32 = 2;

    fn validate(&self) -> Result<(), PasswordError> {
        if self.memory_kib < Self::MIN_MEMORY_KIB {
            return Err(PasswordError::InvalidParameters(format!(
                "memory cost must be at least {} KiB, got {}",
                Self::MIN_MEMORY_KIB,
                self.memory_kib
            )));
        }
        if self.iterations < Self::MIN_ITERATIONS {
            return Err(PasswordError::InvalidParameters(format!(
                "iterations must be at least {}, got {}",
                Self::MIN_ITERATIONS,
                self.iterations
            )));
        }
        Ok(())
    }
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: Self::MIN_MEMORY_KIB,
            iterations: Self::MIN_ITERATIONS,
            parallelism: 1,
        }
    }
}

/// Password hashing implementation.
///
/// Provides salted, deliberately slow password hashing (Argon2id).
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with the default cost parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `params` - Argon2id cost parameters
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are below the minimum cost or rejected by Argon2
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        params.validate()?;

        let argon2_params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params),
        })
    }

    /// Hash a plaintext password.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Fails closed: a malformed hash or any verifier error counts as a mismatch.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True only if the password matches the hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed_hash) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").unwrap();
        let second = hasher.hash("same_password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first));
        assert!(hasher.verify("same_password", &second));
    }

    #[test]
    fn test_verify_invalid_hash_fails_closed() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_with_params_rejects_low_cost() {
        let result = PasswordHasher::with_params(HashingParams {
            memory_kib: 1024,
            iterations: 2,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));

        let result = PasswordHasher::with_params(HashingParams {
            memory_kib: HashingParams::MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }

    #[test]
    fn test_with_params_hash_embeds_cost() {
        let hasher = PasswordHasher::with_params(HashingParams {
            memory_kib: HashingParams::MIN_MEMORY_KIB,
            iterations: 3,
            parallelism: 1,
        })
        .expect("valid parameters");

        let hash = hasher.hash("password123").unwrap();
        assert!(hash.contains("t=3"));
        assert!(hasher.verify("password123", &hash));
    }
}
