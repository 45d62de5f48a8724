use async_trait::async_trait;

use crate::domain::user::errors::IdentityError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::VerifiedIdentity;

/// Port for authentication and account operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new password account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, password and date of birth
    ///
    /// # Returns
    /// Bearer token and the created user
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<AuthSession, UserError>;

    /// Log in with email and password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, account without password or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Log in with a Google ID token.
    ///
    /// The account already linked to the Google subject wins. Otherwise the
    /// account with the same email is linked, or a new account is created.
    ///
    /// # Arguments
    /// * `id_token` - ID token obtained by the client from Google
    ///
    /// # Errors
    /// * `Identity` - Token rejected or provider unavailable
    /// * `GoogleAccountMismatch` - Email belongs to an account linked to another Google subject
    /// * `DatabaseError` - Database operation failed
    async fn login_with_identity_token(&self, id_token: &str) -> Result<AuthSession, UserError>;

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid, expired, or its user no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `GoogleAccountInUse` - Google subject is linked to another user
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalized email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve the user linked to a Google subject.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - Email belongs to another user
    /// * `GoogleAccountInUse` - Google subject is linked to another user
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}

/// Verification of ID tokens issued by a third-party identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Verify an ID token and extract the identity it asserts.
    ///
    /// # Errors
    /// * `NotConfigured` - Provider login is disabled
    /// * `InvalidToken` - Signature, audience, issuer, expiry or claims rejected
    /// * `Upstream` - Provider keys could not be fetched
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError>;
}
