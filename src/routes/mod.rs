pub mod account;
pub mod admin;
pub mod domestic;
pub mod health;
pub mod job;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::AppState;

/// Full application router: public surface (rate limited), authenticated
/// surface (bearer JWT), and the admin surface (shared token).
pub fn build_router(state: AppState) -> Router {
    let config = crate::config::get_config();

    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/home", get(job::home_stats))
        .route("/api/jobs", get(job::list_jobs))
        .route("/api/jobs/search", get(job::search_jobs))
        .route("/api/jobs/:id", get(job::get_job))
        .route("/api/categories", get(job::list_categories))
        .route("/api/contact", post(job::contact))
        .route(
            "/api/account/register/employee",
            post(account::register_employee),
        )
        .route(
            "/api/account/register/household",
            post(account::register_household),
        )
        .route(
            "/api/account/register/company",
            post(account::register_company),
        )
        .route(
            "/api/account/register/domestic-worker",
            post(account::register_domestic_worker),
        )
        .route("/api/account/login", post(account::login))
        .route("/api/account/logout", post(account::logout))
        .route(
            "/api/account/password-reset",
            post(account::request_password_reset),
        )
        .route(
            "/api/account/password-reset/confirm",
            post(account::confirm_password_reset),
        )
        .layer(axum::middleware::from_fn_with_state(
            crate::middleware::rate_limit::new_rps_state(config.public_rps),
            crate::middleware::rate_limit::rps_middleware,
        ));

    let authed_api = Router::new()
        .route("/api/account/me", get(account::me))
        .route("/api/account/profile", patch(account::update_profile))
        .route("/api/account/profile/cv", post(account::upload_cv))
        .route(
            "/api/account/profile/logo",
            post(account::upload_company_logo),
        )
        .route(
            "/api/account/profile/hiring-categories",
            get(account::get_hiring_categories).put(account::set_hiring_categories),
        )
        .route("/api/dashboard", get(job::dashboard))
        .route("/api/jobs", post(job::create_job))
        .route(
            "/api/jobs/:id",
            patch(job::update_job).delete(job::delete_job),
        )
        .route("/api/jobs/:id/close", post(job::close_job))
        .route("/api/jobs/:id/publish", post(job::publish_job))
        .route("/api/jobs/:id/apply", post(job::apply_job))
        .route("/api/jobs/:id/bookmark", post(job::bookmark_job))
        .route("/api/bookmarks/:id", delete(job::delete_bookmark))
        .route("/api/jobs/:id/applicants", get(job::list_applicants))
        .route("/api/applicants/:id", get(job::applicant_details))
        .route("/api/categories", post(job::create_category))
        .route(
            "/api/domestic-jobs",
            get(domestic::list_domestic_jobs).post(domestic::post_domestic_job),
        )
        .route("/api/domestic-jobs/:id", get(domestic::get_domestic_job))
        .layer(axum::middleware::from_fn(
            crate::middleware::auth::require_bearer_auth,
        ));

    let admin_api = Router::new()
        .route("/api/admin/emails", get(admin::list_emails))
        .route("/api/admin/emails/resend", post(admin::resend_emails))
        .layer(axum::middleware::from_fn(
            crate::middleware::auth::require_admin_token,
        ));

    public_api
        .merge(authed_api)
        .merge(admin_api)
        .with_state(state)
}
