use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::account_dto::{
        LoginPayload, LoginResponse, MessageResponse, PasswordResetConfirmPayload,
        PasswordResetRequestPayload, RegisterCompanyPayload, RegisterDomesticWorkerPayload,
        RegisterEmployeePayload, RegisterHouseholdPayload, UpdateProfilePayload, UserResponse,
    },
    error::{Error, Result},
    middleware::auth::{issue_token, AuthUser},
    utils::uploads,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/account/register/employee",
    request_body = RegisterEmployeePayload,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_employee(
    State(state): State<AppState>,
    Json(payload): Json<RegisterEmployeePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.account_service.register_employee(payload).await?;
    let token = issue_token(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/account/register/household",
    request_body = RegisterHouseholdPayload,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_household(
    State(state): State<AppState>,
    Json(payload): Json<RegisterHouseholdPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.account_service.register_household(payload).await?;
    let token = issue_token(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/account/register/company",
    request_body = RegisterCompanyPayload,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_company(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCompanyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.account_service.register_company(payload).await?;
    let token = issue_token(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/account/register/domestic-worker",
    request_body = RegisterDomesticWorkerPayload,
    responses(
        (status = 201, description = "Account and worker profile created"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email or national ID already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_domestic_worker(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDomesticWorkerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, _worker) = state
        .account_service
        .register_domestic_worker(payload)
        .await?;
    let token = issue_token(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/account/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .account_service
        .authenticate(&payload.email, &payload.password)
        .await?;
    let token = issue_token(user.id, user.role)?;
    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Sessions are stateless JWTs; logging out is discarding the token.
#[axum::debug_handler]
pub async fn logout() -> impl IntoResponse {
    Json(MessageResponse {
        message: "You are successfully logged out".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/account/me",
    responses(
        (status = 200, description = "Authenticated user profile"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let profile = state.account_service.get_by_id(user.id).await?;
    Ok(Json(UserResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/account/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 403, description = "Not an employee")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    user.require_employee()?;
    payload.validate()?;
    let updated = state.account_service.update_profile(user.id, payload).await?;
    Ok(Json(UserResponse::from(updated)))
}

#[utoipa::path(
    post,
    path = "/api/account/profile/cv",
    responses(
        (status = 200, description = "CV stored"),
        (status = 400, description = "Missing file field"),
        (status = 403, description = "Not an employee")
    )
)]
#[axum::debug_handler]
pub async fn upload_cv(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    user.require_employee()?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("cv") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "cv".to_string());
            let data = field.bytes().await?;
            let path = uploads::save_upload("cvs", user.id, &filename, data).await?;
            let updated = state.account_service.set_cv(user.id, &path).await?;
            return Ok(Json(UserResponse::from(updated)));
        }
    }
    Err(Error::BadRequest("Missing 'cv' file field".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/account/profile/logo",
    responses(
        (status = 200, description = "Company logo stored"),
        (status = 400, description = "Missing file field"),
        (status = 403, description = "Not an employer")
    )
)]
#[axum::debug_handler]
pub async fn upload_company_logo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("logo") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "logo".to_string());
            let data = field.bytes().await?;
            let path = uploads::save_upload("company_logos", user.id, &filename, data).await?;
            let updated = state.account_service.set_company_logo(user.id, &path).await?;
            return Ok(Json(UserResponse::from(updated)));
        }
    }
    Err(Error::BadRequest("Missing 'logo' file field".to_string()))
}

#[axum::debug_handler]
pub async fn get_hiring_categories(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    let ids = state.account_service.hiring_categories(user.id).await?;
    Ok(Json(ids))
}

#[axum::debug_handler]
pub async fn set_hiring_categories(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(category_ids): Json<Vec<uuid::Uuid>>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    state
        .account_service
        .set_hiring_categories(user.id, &category_ids)
        .await?;
    Ok(Json(MessageResponse {
        message: "Hiring categories updated".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/account/password-reset",
    request_body = PasswordResetRequestPayload,
    responses(
        (status = 200, description = "Reset email dispatched if the account exists")
    )
)]
#[axum::debug_handler]
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetRequestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .account_service
        .request_password_reset(&payload.email, &state.mail_service)
        .await?;
    Ok(Json(MessageResponse {
        message: "If that email is registered, a reset message has been sent".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/account/password-reset/confirm",
    request_body = PasswordResetConfirmPayload,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid or expired token")
    )
)]
#[axum::debug_handler]
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetConfirmPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.account_service.confirm_password_reset(payload).await?;
    Ok(Json(MessageResponse {
        message: "Your password has been reset".to_string(),
    }))
}
