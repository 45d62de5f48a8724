use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Binds a user identifier to an issuance and expiry time (Unix timestamps).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `lifetime` from now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `lifetime` - Time until the token expires
    pub fn for_user(user_id: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Create claims with explicit timestamps.
    pub fn new(sub: impl ToString, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.to_string(),
            iat,
            exp,
        }
    }

    /// Subject as string slice.
    pub fn subject(&self) -> &str {
        &self.sub
    }
}
