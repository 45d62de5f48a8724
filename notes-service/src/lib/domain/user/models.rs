use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::SubsecRound;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UserNameError;

/// User aggregate entity.
///
/// A user authenticates by password, by a linked Google identity, or both.
/// At least one of `password_hash` and `google_id` is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new password-based user.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Normalized email address
    /// * `password_hash` - PHC hash of the chosen password
    /// * `date_of_birth` - Optional date of birth
    pub fn with_password(
        name: UserName,
        email: EmailAddress,
        password_hash: String,
        date_of_birth: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash: Some(password_hash),
            google_id: None,
            date_of_birth,
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a new user bound to a verified Google identity.
    ///
    /// # Arguments
    /// * `identity` - Verified identity claims
    /// * `email` - Normalized form of the identity's email
    pub fn from_identity(identity: &VerifiedIdentity, email: EmailAddress) -> Self {
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: UserId::new(),
            name: UserName::from_identity(identity.name.as_deref()),
            email,
            password_hash: None,
            google_id: Some(identity.subject.clone()),
            date_of_birth: None,
            avatar: identity.picture.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account can log in with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Whether the account is linked to a Google identity.
    pub fn is_linked(&self) -> bool {
        self.google_id.is_some()
    }

    /// Attach a Google identity to this account, keeping existing credentials.
    pub fn link_identity(&mut self, identity: &VerifiedIdentity) {
        self.google_id = Some(identity.subject.clone());
        self.avatar = identity.picture.clone();
        self.updated_at = Utc::now().trunc_subsecs(6);
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, non-empty and at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 100;
    const IDENTITY_FALLBACK: &'static str = "Google User";

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, UserNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(UserNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Name for an account created from a third-party identity.
    ///
    /// Falls back to a generic name when the provider sent none, and
    /// truncates overlong names instead of rejecting them.
    pub fn from_identity(name: Option<&str>) -> Self {
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        match name {
            Some(n) => Self(n.chars().take(Self::MAX_LENGTH).collect()),
            None => Self(Self::IDENTITY_FALLBACK.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed and lower-cased, so lookups and uniqueness are case-insensitive.
/// Validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the signup policy.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;
    pub const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();

        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Identity claims extracted from a verified third-party ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Stable subject identifier at the provider
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Command to register a new password account
#[derive(Debug)]
pub struct SignupCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
    pub date_of_birth: Option<NaiveDate>,
}

/// Command to log in with email and password.
///
/// The password is not policy-checked: any mismatch is reported as
/// invalid credentials.
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful signup or login: a bearer token and the account.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Alice@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_rejects_invalid() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(UserName::new("  Alice ".to_string()).unwrap().as_str(), "Alice");
        assert_eq!(UserName::new("   ".to_string()), Err(UserNameError::Empty));
        assert!(matches!(
            UserName::new("a".repeat(101)),
            Err(UserNameError::TooLong { max: 100, actual: 101 })
        ));
    }

    #[test]
    fn test_name_from_identity() {
        assert_eq!(UserName::from_identity(None).as_str(), "Google User");
        assert_eq!(UserName::from_identity(Some("  ")).as_str(), "Google User");
        assert_eq!(UserName::from_identity(Some("Bob")).as_str(), "Bob");
        assert_eq!(
            UserName::from_identity(Some(&"b".repeat(150)))
                .as_str()
                .chars()
                .count(),
            100
        );
    }

    #[test]
    fn test_password_policy() {
        assert!(matches!(
            Password::new("12345".to_string()),
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        ));
        assert!(Password::new("123456".to_string()).is_ok());
        assert!(Password::new("x".repeat(129)).is_err());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("super-secret".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("super-secret"));

        let command = LoginCommand {
            email: EmailAddress::new("a@example.com".to_string()).unwrap(),
            password: "super-secret".to_string(),
        };
        assert!(!format!("{:?}", command).contains("super-secret"));
    }

    #[test]
    fn test_link_identity_keeps_password() {
        let mut user = User::with_password(
            UserName::new("Alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            None,
        );
        let identity = VerifiedIdentity {
            subject: "google-sub-1".to_string(),
            email: "alice@example.com".to_string(),
            name: Some("Alice G".to_string()),
            picture: Some("https://example.com/a.png".to_string()),
        };

        user.link_identity(&identity);

        assert!(user.has_password());
        assert!(user.is_linked());
        assert_eq!(user.google_id.as_deref(), Some("google-sub-1"));
        assert_eq!(user.avatar.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(user.name.as_str(), "Alice");
        assert_eq!(user.created_at.timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(user.updated_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_from_identity_has_no_password() {
        let identity = VerifiedIdentity {
            subject: "google-sub-2".to_string(),
            email: "bob@example.com".to_string(),
            name: None,
            picture: None,
        };
        let user = User::from_identity(
            &identity,
            EmailAddress::new(identity.email.clone()).unwrap(),
        );

        assert!(!user.has_password());
        assert!(user.is_linked());
        assert_eq!(user.name.as_str(), "Google User");
    }
}
