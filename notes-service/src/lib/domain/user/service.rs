use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::errors::IdentityError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::VerifiedIdentity;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::IdentityVerifier;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for authentication and accounts.
///
/// Concrete implementation of AuthServicePort with dependency injection. The
/// repository and verifier may be trait objects so the storage backend can be
/// chosen at startup.
pub struct AuthService<UR, IV>
where
    UR: UserRepository + ?Sized,
    IV: IdentityVerifier + ?Sized,
{
    repository: Arc<UR>,
    identity_verifier: Arc<IV>,
    authenticator: Authenticator,
}

impl<UR, IV> AuthService<UR, IV>
where
    UR: UserRepository + ?Sized,
    IV: IdentityVerifier + ?Sized,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `identity_verifier` - Third-party ID token verification
    /// * `authenticator` - Password hashing and token issuance
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(
        repository: Arc<UR>,
        identity_verifier: Arc<IV>,
        authenticator: Authenticator,
    ) -> Self {
        Self {
            repository,
            identity_verifier,
            authenticator,
        }
    }

    /// Argon2 is CPU bound, so hashing runs on the blocking pool.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = self.authenticator.clone();

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(
        &self,
        password: String,
        stored_hash: String,
    ) -> Result<bool, UserError> {
        let authenticator = self.authenticator.clone();

        tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))
    }

    /// Account for a verified identity: linked by subject, else matched by
    /// email and linked, else created.
    async fn resolve_identity(
        &self,
        identity: &VerifiedIdentity,
        email: EmailAddress,
    ) -> Result<User, UserError> {
        if let Some(user) = self.repository.find_by_google_id(&identity.subject).await? {
            return Ok(user);
        }

        let existing = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => match self
                .repository
                .create(User::from_identity(identity, email.clone()))
                .await
            {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "User created from Google identity");
                    return Ok(user);
                }
                // A concurrent first login won the insert
                Err(UserError::EmailAlreadyExists(_)) => {
                    self.repository.find_by_email(&email).await?.ok_or_else(|| {
                        UserError::Unknown("Account vanished after insert race".to_string())
                    })?
                }
                Err(UserError::GoogleAccountInUse(_)) => {
                    return self
                        .repository
                        .find_by_google_id(&identity.subject)
                        .await?
                        .ok_or_else(|| {
                            UserError::Unknown("Account vanished after insert race".to_string())
                        });
                }
                Err(e) => return Err(e),
            },
        };

        match existing.google_id.as_deref() {
            None => {
                let mut user = existing;
                user.link_identity(identity);
                let user = self.repository.update(user).await?;
                tracing::info!(user_id = %user.id, "Google identity linked to existing user");
                Ok(user)
            }
            Some(subject) if subject == identity.subject => Ok(existing),
            Some(_) => {
                tracing::warn!(
                    user_id = %existing.id,
                    "Google login rejected: account linked to another subject"
                );
                Err(UserError::GoogleAccountMismatch)
            }
        }
    }

    fn open_session(&self, user: User) -> Result<AuthSession, UserError> {
        let token = self
            .authenticator
            .issue_token(user.id)
            .map_err(|e| UserError::Unknown(format!("Token issuance failed: {}", e)))?;

        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl<UR, IV> AuthServicePort for AuthService<UR, IV>
where
    UR: UserRepository + ?Sized,
    IV: IdentityVerifier + ?Sized,
{
    async fn signup(&self, command: SignupCommand) -> Result<AuthSession, UserError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let user = User::with_password(
            command.name,
            command.email,
            password_hash,
            command.date_of_birth,
        );

        // The store re-checks uniqueness, a concurrent signup surfaces here
        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User signed up");

        self.open_session(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!("Login rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let Some(stored_hash) = user.password_hash.clone() else {
            tracing::debug!(user_id = %user.id, "Login rejected: account has no password");
            return Err(UserError::InvalidCredentials);
        };

        if !self.verify_password(command.password, stored_hash).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.open_session(user)
    }

    async fn login_with_identity_token(&self, id_token: &str) -> Result<AuthSession, UserError> {
        let identity = self.identity_verifier.verify(id_token).await?;

        let email = EmailAddress::new(identity.email.clone())
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        let user = self.resolve_identity(&identity, email).await?;
        self.open_session(user)
    }

    async fn authenticate(&self, token: &str) -> Result<User, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            UserError::Unauthenticated("Invalid or expired token".to_string())
        })?;

        let user_id = UserId::from_string(claims.subject())
            .map_err(|_| UserError::Unauthenticated("Invalid or expired token".to_string()))?;

        self.repository.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "Token rejected: user no longer exists");
            UserError::Unauthenticated("Invalid or expired token".to_string())
        })
    }
}
