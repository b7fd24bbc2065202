use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::account_dto::{MessageResponse, UserResponse},
    dto::job_dto::{
        ContactPayload, CreateJobPayload, DashboardResponse, HomeStatsResponse, JobDetailResponse,
        JobListQuery, JobListResponse, JobResponse, JobSearchQuery, UpdateJobPayload,
    },
    error::Result,
    middleware::auth::AuthUser,
    models::user::Role,
    services::job_service::JobList,
    AppState,
};

impl From<JobList> for JobListResponse {
    fn from(list: JobList) -> Self {
        Self {
            items: list.items.into_iter().map(JobResponse::from).collect(),
            total: list.total,
            page: list.page,
            per_page: list.per_page,
            total_pages: list.total_pages,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("sort_by" = Option<String>, Query, description = "newest_first | oldest_first | salary_high_low | salary_low_high | title_asc")
    ),
    responses(
        (status = 200, description = "Published, open jobs")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(list)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/search",
    params(
        ("job_title_or_company_name" = Option<String>, Query, description = "Substring match on title or company"),
        ("location" = Option<String>, Query, description = "Substring match on location"),
        ("job_type" = Option<String>, Query, description = "Exact job type"),
        ("experience_level" = Option<String>, Query, description = "Exact experience level"),
        ("work_arrangement" = Option<String>, Query, description = "Exact work arrangement")
    ),
    responses(
        (status = 200, description = "Matching published, open jobs")
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let list = state.job_service.search(query).await?;
    Ok(Json(JobListResponse::from(list)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job detail with applicant count"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    let applicant_count = state.job_service.applicant_count(id).await?;
    Ok(Json(JobDetailResponse {
        job: JobResponse::from(job),
        applicant_count,
    }))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created, unpublished until published"),
        (status = 403, description = "Not an employer")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    payload.validate()?;
    let job = state.job_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, user.id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id, user.id).await?;
    Ok(Json(MessageResponse {
        message: "Your job post was successfully deleted".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/close",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job marked closed"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    let job = state.job_service.close(id, user.id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/publish",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job published"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn publish_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    let job = state.job_service.publish(id, user.id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 201, description = "Application recorded"),
        (status = 403, description = "Not an employee"),
        (status = 409, description = "Already applied")
    )
)]
#[axum::debug_handler]
pub async fn apply_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employee()?;
    state.job_service.apply(user.id, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "You have successfully applied for this job".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/bookmark",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 201, description = "Job saved"),
        (status = 403, description = "Not an employee"),
        (status = 409, description = "Already saved")
    )
)]
#[axum::debug_handler]
pub async fn bookmark_job(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employee()?;
    state.job_service.bookmark(user.id, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "You have successfully saved this job".to_string(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/bookmarks/{id}",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, description = "Saved job removed"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Bookmark not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employee()?;
    state.job_service.unbookmark(user.id, id).await?;
    Ok(Json(MessageResponse {
        message: "Saved job was successfully deleted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/applicants",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Applicants for an owned job"),
        (status = 403, description = "Not the owner")
    )
)]
#[axum::debug_handler]
pub async fn list_applicants(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    let applicants = state.job_service.applicants_for_job(id, user.id).await?;
    Ok(Json(applicants))
}

#[utoipa::path(
    get,
    path = "/api/applicants/{id}",
    params(("id" = Uuid, Path, description = "Applicant user ID")),
    responses(
        (status = 200, description = "Applicant profile"),
        (status = 403, description = "Not an employer")
    )
)]
#[axum::debug_handler]
pub async fn applicant_details(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    let applicant = state.account_service.get_by_id(id).await?;
    Ok(Json(UserResponse::from(applicant)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Role-conditional dashboard")
    )
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let response = match user.role {
        Role::Employer => {
            let jobs = state.job_service.employer_dashboard(user.id).await?;
            DashboardResponse::Employer { jobs }
        }
        Role::Employee => {
            let (applied, saved) = state.job_service.employee_dashboard(user.id).await?;
            DashboardResponse::Employee {
                applied_jobs: applied.into_iter().map(JobResponse::from).collect(),
                saved_jobs: saved.into_iter().map(JobResponse::from).collect(),
            }
        }
    };
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Site-wide counts and recent jobs")
    )
)]
#[axum::debug_handler]
pub async fn home_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.job_service.home_stats(6).await?;
    Ok(Json(HomeStatsResponse {
        total_candidates: stats.total_candidates,
        total_companies: stats.total_companies,
        total_jobs: stats.total_jobs,
        total_completed_jobs: stats.total_completed_jobs,
        recent_jobs: stats
            .recent_jobs
            .into_iter()
            .map(JobResponse::from)
            .collect(),
    }))
}

/// Validation only; no delivery is wired in.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Message accepted"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn contact(Json(payload): Json<ContactPayload>) -> Result<impl IntoResponse> {
    payload.validate()?;
    Ok(Json(MessageResponse {
        message: "Your message has been sent successfully! We will get back to you shortly"
            .to_string(),
    }))
}

#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.job_service.list_categories().await?;
    Ok(Json(categories))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse> {
    user.require_employer()?;
    payload.validate()?;
    let category = state.job_service.create_category(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
