use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domestic::ServiceType;
use crate::models::user::{Gender, Role, User};

fn passwords_match(password: &str, password2: &str) -> Result<(), ValidationError> {
    if password != password2 {
        return Err(ValidationError::new("password_mismatch")
            .with_message("Passwords don't match".into()));
    }
    Ok(())
}

/// Registration payloads intentionally carry no role field; the endpoint
/// fixes the role regardless of what the submitter sends.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_employee_passwords"))]
pub struct RegisterEmployeePayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password2: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub preferred_job_title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    #[validate(range(min = 0))]
    pub years_of_experience: Option<i32>,
}

fn validate_employee_passwords(p: &RegisterEmployeePayload) -> Result<(), ValidationError> {
    passwords_match(&p.password, &p.password2)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_household_passwords"))]
pub struct RegisterHouseholdPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password2: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
}

fn validate_household_passwords(p: &RegisterHouseholdPayload) -> Result<(), ValidationError> {
    passwords_match(&p.password, &p.password2)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_company_passwords"))]
pub struct RegisterCompanyPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password2: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(url)]
    pub company_website: Option<String>,
}

fn validate_company_passwords(p: &RegisterCompanyPayload) -> Result<(), ValidationError> {
    passwords_match(&p.password, &p.password2)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_worker_passwords"))]
pub struct RegisterDomesticWorkerPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password2: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub national_id: String,
    pub service_type: ServiceType,
}

fn validate_worker_passwords(p: &RegisterDomesticWorkerPayload) -> Result<(), ValidationError> {
    passwords_match(&p.password, &p.password2)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    #[validate(range(min = 0))]
    pub years_of_experience: Option<i32>,
    pub preferred_job_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequestPayload {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_reset_passwords"))]
pub struct PasswordResetConfirmPayload {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password2: String,
}

fn validate_reset_passwords(p: &PasswordResetConfirmPayload) -> Result<(), ValidationError> {
    passwords_match(&p.password, &p.password2)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub role: Role,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub company_website: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub cv: Option<String>,
    pub skills: Option<String>,
    pub years_of_experience: Option<i32>,
    pub preferred_job_title: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            role: user.role,
            company_name: user.company_name,
            company_logo: user.company_logo,
            company_website: user.company_website,
            phone_number: user.phone_number,
            location: user.location,
            cv: user.cv,
            skills: user.skills,
            years_of_experience: user.years_of_experience,
            preferred_job_title: user.preferred_job_title,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_payload() -> RegisterEmployeePayload {
        RegisterEmployeePayload {
            email: "alice@example.com".into(),
            password: "correct-horse".into(),
            password2: "correct-horse".into(),
            first_name: "Alice".into(),
            last_name: "Wanjiku".into(),
            gender: None,
            phone_number: None,
            location: None,
            preferred_job_title: None,
            bio: None,
            skills: None,
            years_of_experience: None,
        }
    }

    #[test]
    fn matching_passwords_pass() {
        assert!(employee_payload().validate().is_ok());
    }

    #[test]
    fn mismatched_passwords_fail() {
        let mut payload = employee_payload();
        payload.password2 = "different".into();
        let err = payload.validate().unwrap_err();
        assert!(err.to_string().contains("Passwords don't match"));
    }

    #[test]
    fn bad_email_fails() {
        let mut payload = employee_payload();
        payload.email = "not-an-email".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn short_password_fails() {
        let mut payload = employee_payload();
        payload.password = "short".into();
        payload.password2 = "short".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn registration_payload_ignores_injected_role() {
        // Unknown fields are dropped on deserialization, so a submitted
        // "role" can never reach the persistence layer.
        let payload: RegisterEmployeePayload = serde_json::from_value(serde_json::json!({
            "email": "bob@example.com",
            "password": "correct-horse",
            "password2": "correct-horse",
            "first_name": "Bob",
            "last_name": "Otieno",
            "role": "employer"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
