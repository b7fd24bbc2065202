use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub role: Role,
}

/// Authenticated identity, inserted into request extensions by
/// `require_bearer_auth` and consumed by handlers as an explicit argument.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Authentication is established by the time these run, so a mismatch
    /// is a 403, not a 401.
    pub fn require_employer(&self) -> Result<()> {
        match self.role {
            Role::Employer => Ok(()),
            Role::Employee => Err(Error::Forbidden(
                "This action is only available for employers".to_string(),
            )),
        }
    }

    pub fn require_employee(&self) -> Result<()> {
        match self.role {
            Role::Employee => Ok(()),
            Role::Employer => Err(Error::Forbidden(
                "This action is only available for employees".to_string(),
            )),
        }
    }
}

pub fn issue_token(user_id: Uuid, role: Role) -> Result<String> {
    let config = crate::config::get_config();
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now() + Duration::days(7)).timestamp() as usize,
        role,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))
}

/// Gate for the administrative surface: a shared token in `X-Admin-Token`,
/// compared in constant time.
pub async fn require_admin_token(req: Request, next: Next) -> Response {
    use subtle::ConstantTimeEq;

    let config = crate::config::get_config();
    let presented = req
        .headers()
        .get("x-admin-token")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let matches: bool = presented
        .as_bytes()
        .ct_eq(config.admin_token.as_bytes())
        .into();
    if !matches {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_admin_token"})),
        )
            .into_response();
    }
    next.run(req).await
}

pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            let user = AuthUser {
                id: data.claims.sub,
                role: data.claims.role,
            };
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response(),
    }
}
