use std::env;

use uuid::Uuid;

use jobboard_backend::dto::account_dto::{RegisterCompanyPayload, RegisterEmployeePayload};
use jobboard_backend::dto::job_dto::{CreateJobPayload, JobListQuery, JobSearchQuery};
use jobboard_backend::error::Error;
use jobboard_backend::models::job::JobType;
use jobboard_backend::models::user::Role;
use jobboard_backend::services::{account_service::AccountService, job_service::JobService};

async fn setup_pool() -> Option<sqlx::PgPool> {
    let Ok(_) = env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    };
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("ADMIN_TOKEN", "admin_test_token");
    let _ = jobboard_backend::config::init_config();

    let pool = jobboard_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    Some(pool)
}

fn company_payload(marker: Uuid) -> RegisterCompanyPayload {
    RegisterCompanyPayload {
        email: format!("employer_{}@example.com", marker),
        password: "correct-horse".into(),
        password2: "correct-horse".into(),
        first_name: "Grace".into(),
        last_name: "Kamau".into(),
        company_name: "Acme Ltd".into(),
        company_website: None,
    }
}

fn employee_payload(marker: Uuid) -> RegisterEmployeePayload {
    RegisterEmployeePayload {
        email: format!("employee_{}@example.com", marker),
        password: "correct-horse".into(),
        password2: "correct-horse".into(),
        first_name: "Brian".into(),
        last_name: "Odhiambo".into(),
        gender: None,
        phone_number: None,
        location: Some("Nairobi".into()),
        preferred_job_title: None,
        bio: None,
        skills: None,
        years_of_experience: Some(3),
    }
}

fn job_payload(marker: Uuid, category_id: Uuid) -> CreateJobPayload {
    CreateJobPayload {
        title: format!("Software Developer {}", marker),
        description: "Build things".into(),
        tags: "rust,backend".into(),
        location: "Nairobi, Kenya".into(),
        job_type: JobType::FullTime,
        experience_level: None,
        work_arrangement: None,
        category_id,
        salary: "$800 - $1200".into(),
        benefits: None,
        company_name: "Acme Ltd".into(),
        company_description: None,
        url: None,
        last_date: None,
    }
}

#[tokio::test]
async fn registration_fixes_role_per_endpoint() {
    let Some(pool) = setup_pool().await else { return };
    let accounts = AccountService::new(pool);
    let marker = Uuid::new_v4();

    let employer = accounts.register_company(company_payload(marker)).await.unwrap();
    assert_eq!(employer.role, Role::Employer);

    let employee = accounts.register_employee(employee_payload(marker)).await.unwrap();
    assert_eq!(employee.role, Role::Employee);

    // Duplicate email is a distinguishable conflict, not a generic failure.
    let err = accounts
        .register_company(company_payload(marker))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
}

#[tokio::test]
async fn duplicate_application_and_bookmark_are_conflicts() {
    let Some(pool) = setup_pool().await else { return };
    let accounts = AccountService::new(pool.clone());
    let jobs = JobService::new(pool.clone());
    let marker = Uuid::new_v4();

    let employer = accounts.register_company(company_payload(marker)).await.unwrap();
    let employee = accounts.register_employee(employee_payload(marker)).await.unwrap();
    let category = jobs
        .create_category(&format!("General {}", marker))
        .await
        .unwrap();
    let job = jobs
        .create(employer.id, job_payload(marker, category.id))
        .await
        .unwrap();
    jobs.publish(job.id, employer.id).await.unwrap();

    jobs.apply(employee.id, job.id).await.unwrap();
    let err = jobs.apply(employee.id, job.id).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
    assert_eq!(jobs.applicant_count(job.id).await.unwrap(), 1);

    jobs.bookmark(employee.id, job.id).await.unwrap();
    let err = jobs.bookmark(employee.id, job.id).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
}

#[tokio::test]
async fn closing_is_owner_only_and_one_way() {
    let Some(pool) = setup_pool().await else { return };
    let accounts = AccountService::new(pool.clone());
    let jobs = JobService::new(pool.clone());
    let marker = Uuid::new_v4();

    let employer = accounts.register_company(company_payload(marker)).await.unwrap();
    let stranger = accounts.register_employee(employee_payload(marker)).await.unwrap();
    let category = jobs
        .create_category(&format!("General {}", marker))
        .await
        .unwrap();
    let job = jobs
        .create(employer.id, job_payload(marker, category.id))
        .await
        .unwrap();
    jobs.publish(job.id, employer.id).await.unwrap();

    let listed = jobs.list(JobListQuery::default()).await.unwrap();
    assert!(listed.items.iter().any(|j| j.id == job.id));

    let err = jobs.close(job.id, stranger.id).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let closed = jobs.close(job.id, employer.id).await.unwrap();
    assert!(closed.is_closed);

    let listed = jobs.list(JobListQuery::default()).await.unwrap();
    assert!(!listed.items.iter().any(|j| j.id == job.id));
}

#[tokio::test]
async fn search_filters_compose_conjunctively() {
    let Some(pool) = setup_pool().await else { return };
    let accounts = AccountService::new(pool.clone());
    let jobs = JobService::new(pool.clone());
    let marker = Uuid::new_v4();

    let employer = accounts.register_company(company_payload(marker)).await.unwrap();
    let category = jobs
        .create_category(&format!("General {}", marker))
        .await
        .unwrap();
    let job = jobs
        .create(employer.id, job_payload(marker, category.id))
        .await
        .unwrap();
    jobs.publish(job.id, employer.id).await.unwrap();

    let hit = jobs
        .search(JobSearchQuery {
            job_title_or_company_name: Some(format!("Developer {}", marker)),
            location: Some("nairobi".into()),
            job_type: Some(JobType::FullTime),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(hit.items.iter().any(|j| j.id == job.id));

    let miss = jobs
        .search(JobSearchQuery {
            job_title_or_company_name: Some(format!("Developer {}", marker)),
            job_type: Some(JobType::Internship),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!miss.items.iter().any(|j| j.id == job.id));
}

#[tokio::test]
async fn unpublished_jobs_stay_out_of_listing() {
    let Some(pool) = setup_pool().await else { return };
    let accounts = AccountService::new(pool.clone());
    let jobs = JobService::new(pool.clone());
    let marker = Uuid::new_v4();

    let employer = accounts.register_company(company_payload(marker)).await.unwrap();
    let category = jobs
        .create_category(&format!("General {}", marker))
        .await
        .unwrap();
    let job = jobs
        .create(employer.id, job_payload(marker, category.id))
        .await
        .unwrap();
    assert!(!job.is_published);

    let listed = jobs.list(JobListQuery::default()).await.unwrap();
    assert!(!listed.items.iter().any(|j| j.id == job.id));
}
