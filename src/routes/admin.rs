use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::mail_dto::{
        EmailListQuery, EmailListResponse, OutgoingEmailResponse, ResendEmailsPayload,
        ResendEmailsResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/emails",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("sent" = Option<bool>, Query, description = "Filter by sent flag")
    ),
    responses(
        (status = 200, description = "Stored outgoing emails, newest first"),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
#[axum::debug_handler]
pub async fn list_emails(
    State(state): State<AppState>,
    Query(query): Query<EmailListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.mail_service.list(query).await?;
    Ok(Json(EmailListResponse {
        items: list
            .items
            .into_iter()
            .map(OutgoingEmailResponse::from)
            .collect(),
        total: list.total,
        page: list.page,
        per_page: list.per_page,
        total_pages: list.total_pages,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/emails/resend",
    request_body = ResendEmailsPayload,
    responses(
        (status = 200, description = "Resend attempted; count of records flipped to sent"),
        (status = 401, description = "Missing or invalid admin token")
    )
)]
#[axum::debug_handler]
pub async fn resend_emails(
    State(state): State<AppState>,
    Json(payload): Json<ResendEmailsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let resent = state.mail_service.resend(&payload.ids).await?;
    Ok(Json(ResendEmailsResponse { resent }))
}
