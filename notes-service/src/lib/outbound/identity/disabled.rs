use async_trait::async_trait;

use crate::domain::user::errors::IdentityError;
use crate::domain::user::models::VerifiedIdentity;
use crate::domain::user::ports::IdentityVerifier;

/// Verifier used when Google login is not configured. Rejects every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledIdentityVerifier;

#[async_trait]
impl IdentityVerifier for DisabledIdentityVerifier {
    async fn verify(&self, _id_token: &str) -> Result<VerifiedIdentity, IdentityError> {
        Err(IdentityError::NotConfigured)
    }
}
