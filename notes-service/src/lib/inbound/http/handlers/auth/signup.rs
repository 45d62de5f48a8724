use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use serde::Deserialize;

use super::AuthResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UserName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldError;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SignupRequestBody>, ApiError>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let session = state.auth_service.signup(body.try_into_command()?).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData::new("User created successfully", session),
    ))
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SignupRequestBody {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    date_of_birth: Option<NaiveDate>,
}

impl SignupRequestBody {
    /// Validates every field, reporting all failures at once.
    fn try_into_command(self) -> Result<SignupCommand, ApiError> {
        let mut errors = Vec::new();

        let name = UserName::new(self.name)
            .map_err(|e| errors.push(FieldError::new("name", e)))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.push(FieldError::new("email", e)))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.push(FieldError::new("password", e)))
            .ok();

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(SignupCommand {
                name,
                email,
                password,
                date_of_birth: self.date_of_birth,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_field_errors() {
        let body: SignupRequestBody = serde_json::from_value(serde_json::json!({
            "name": " ",
            "email": "nope",
            "password": "123"
        }))
        .unwrap();

        let Err(ApiError::Validation(errors)) = body.try_into_command() else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = serde_json::from_value::<SignupRequestBody>(serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "password123",
            "isAdmin": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parses_date_of_birth() {
        let body: SignupRequestBody = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "Alice@Example.com",
            "password": "password123",
            "dateOfBirth": "1990-05-17"
        }))
        .unwrap();

        let command = body.try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "alice@example.com");
        assert_eq!(command.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17));
    }
}
