use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domestic::{DomesticJob, ServiceType};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDomesticJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub service_category: ServiceType,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DomesticJobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomesticJobResponse {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub service_category: ServiceType,
    pub location: String,
    pub description: String,
    pub is_active: bool,
    pub posted_on: DateTime<Utc>,
}

impl From<DomesticJob> for DomesticJobResponse {
    fn from(job: DomesticJob) -> Self {
        Self {
            id: job.id,
            employer_id: job.employer_id,
            title: job.title,
            service_category: job.service_category,
            location: job.location,
            description: job.description,
            is_active: job.is_active,
            posted_on: job.posted_on,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomesticJobListResponse {
    pub items: Vec<DomesticJobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}
