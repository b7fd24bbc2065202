use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{ExperienceLevel, Job, JobType, WorkArrangement};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub job_type: JobType,
    pub experience_level: Option<ExperienceLevel>,
    pub work_arrangement: Option<WorkArrangement>,
    pub category_id: Uuid,
    #[serde(default)]
    pub salary: String,
    pub benefits: Option<String>,
    #[validate(length(min = 1))]
    pub company_name: String,
    pub company_description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub tags: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub work_arrangement: Option<WorkArrangement>,
    pub category_id: Option<Uuid>,
    pub salary: Option<String>,
    pub benefits: Option<String>,
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub last_date: Option<NaiveDate>,
}

/// Client-selectable orderings for the public listing. Salary is stored as
/// free text, so the salary orderings are lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    SalaryHighLow,
    SalaryLowHigh,
    TitleAsc,
}

impl SortKey {
    pub fn order_clause(self) -> &'static str {
        match self {
            SortKey::NewestFirst => "created_at DESC",
            SortKey::OldestFirst => "created_at ASC",
            SortKey::SalaryHighLow => "salary DESC",
            SortKey::SalaryLowHigh => "salary ASC",
            SortKey::TitleAsc => "title ASC",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_by: Option<SortKey>,
}

/// All filters optional; absence means no constraint. Filters compose
/// conjunctively.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobSearchQuery {
    pub job_title_or_company_name: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub work_arrangement: Option<WorkArrangement>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: Option<ExperienceLevel>,
    pub work_arrangement: Option<WorkArrangement>,
    pub category_id: Uuid,
    pub salary: String,
    pub benefits: Option<String>,
    pub company_name: String,
    pub company_description: Option<String>,
    pub url: Option<String>,
    pub last_date: Option<NaiveDate>,
    pub is_published: bool,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            user_id: job.user_id,
            title: job.title,
            description: job.description,
            tags: job.tags,
            location: job.location,
            job_type: job.job_type,
            experience_level: job.experience_level,
            work_arrangement: job.work_arrangement,
            category_id: job.category_id,
            salary: job.salary,
            benefits: job.benefits,
            company_name: job.company_name,
            company_description: job.company_description,
            url: job.url,
            last_date: job.last_date,
            is_published: job.is_published,
            is_closed: job.is_closed,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: JobResponse,
    pub applicant_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobWithApplicantCount {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub is_published: bool,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
    pub applicant_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardResponse {
    Employer { jobs: Vec<JobWithApplicantCount> },
    Employee {
        applied_jobs: Vec<JobResponse>,
        saved_jobs: Vec<JobResponse>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeStatsResponse {
    pub total_candidates: i64,
    pub total_companies: i64,
    pub total_jobs: i64,
    pub total_completed_jobs: i64,
    pub recent_jobs: Vec<JobResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_defaults_to_newest_first() {
        let query: JobListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sort_by.unwrap_or_default(), SortKey::NewestFirst);
    }

    #[test]
    fn sort_key_parses_from_query_values() {
        let query: JobListQuery =
            serde_json::from_str(r#"{"sort_by": "salary_high_low"}"#).unwrap();
        assert_eq!(query.sort_by, Some(SortKey::SalaryHighLow));
        assert_eq!(query.sort_by.unwrap().order_clause(), "salary DESC");
    }

    #[test]
    fn search_query_all_filters_optional() {
        let query: JobSearchQuery = serde_json::from_str("{}").unwrap();
        assert!(query.job_title_or_company_name.is_none());
        assert!(query.job_type.is_none());
    }
}
