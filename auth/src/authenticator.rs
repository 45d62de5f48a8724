use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default bearer token lifetime.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 7 * 24;

/// Authentication coordinator combining password verification and token issuance.
///
/// Tokens are stateless: nothing is stored server-side, so a token stays valid
/// until it expires.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and a 7 day token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
        }
    }

    /// Replace the password hasher (e.g. one built with custom cost parameters).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Override the token lifetime.
    pub fn with_token_lifetime(mut self, token_lifetime: Duration) -> Self {
        self.token_lifetime = token_lifetime;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash. Fails closed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a signed token binding the user identifier.
    ///
    /// Callers verify the password (or a third-party identity) first.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, user_id: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, self.token_lifetime);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_password_round_trip() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash));
        assert!(!authenticator.verify_password("wrong_password", &hash));
        assert!(!authenticator.verify_password("my_password", "not-a-phc-string"));
    }

    #[test]
    fn test_issued_token_lifetime() {
        let authenticator = Authenticator::new(SECRET);

        let token = authenticator.issue_token("user123").unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_LIFETIME_HOURS * 3600);
    }

    #[test]
    fn test_custom_token_lifetime() {
        let authenticator = Authenticator::new(SECRET).with_token_lifetime(Duration::hours(1));

        let token = authenticator.issue_token("user123").unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_validate_token_from_other_secret() {
        let issuer = Authenticator::new(b"another_secret_key_at_least_32_bytes");
        let verifier = Authenticator::new(SECRET);

        let token = issuer.issue_token("user123").unwrap();
        assert_eq!(
            verifier.validate_token(&token),
            Err(JwtError::InvalidSignature)
        );
    }
}
