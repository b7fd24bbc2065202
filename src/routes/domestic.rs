use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::domestic_dto::{
        CreateDomesticJobPayload, DomesticJobListQuery, DomesticJobListResponse,
        DomesticJobResponse,
    },
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/domestic-jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Active domestic jobs, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_domestic_jobs(
    State(state): State<AppState>,
    Query(query): Query<DomesticJobListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.domestic_service.list_active(query).await?;
    Ok(Json(DomesticJobListResponse {
        items: list
            .items
            .into_iter()
            .map(DomesticJobResponse::from)
            .collect(),
        total: list.total,
        page: list.page,
        per_page: list.per_page,
        total_pages: list.total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/domestic-jobs/{id}",
    params(("id" = Uuid, Path, description = "Domestic job ID")),
    responses(
        (status = 200, description = "Domestic job detail"),
        (status = 404, description = "Not found or inactive")
    )
)]
#[axum::debug_handler]
pub async fn get_domestic_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.domestic_service.get_active(id).await?;
    Ok(Json(DomesticJobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/domestic-jobs",
    request_body = CreateDomesticJobPayload,
    responses(
        (status = 201, description = "Domestic job posted"),
        (status = 403, description = "Not an employer")
    )
)]
#[axum::debug_handler]
pub async fn post_domestic_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateDomesticJobPayload>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    payload.validate()?;
    let job = state.domestic_service.post_job(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(DomesticJobResponse::from(job))))
}
