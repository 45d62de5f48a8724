use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::User;

pub mod google;
pub mod login;
pub mod profile;
pub mod signup;

/// Public view of a user. Credentials are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            date_of_birth: user.date_of_birth,
            avatar: user.avatar.clone(),
        }
    }
}

/// Body returned by signup, login and Google login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub message: String,
    pub token: String,
    pub user: UserData,
}

impl AuthResponseData {
    pub fn new(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_string(),
            user: (&session.user).into(),
            token: session.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserName;

    #[test]
    fn test_user_data_hides_credentials() {
        let mut user = User::with_password(
            UserName::new("Alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "$argon2id$secret-hash".to_string(),
            NaiveDate::from_ymd_opt(1990, 5, 17),
        );
        user.google_id = Some("google-sub".to_string());

        let json = serde_json::to_value(UserData::from(&user)).unwrap();

        assert_eq!(json["dateOfBirth"], "1990-05-17");
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("avatar").is_none());
        let rendered = json.to_string();
        assert!(!rendered.contains("argon2"));
        assert!(!rendered.contains("google-sub"));
    }
}
