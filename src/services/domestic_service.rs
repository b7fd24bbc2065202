use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::domestic_dto::{CreateDomesticJobPayload, DomesticJobListQuery};
use crate::error::{Error, Result};
use crate::models::domestic::DomesticJob;

#[derive(Clone)]
pub struct DomesticService {
    pool: PgPool,
}

pub struct DomesticJobList {
    pub items: Vec<DomesticJob>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl DomesticService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn post_job(
        &self,
        employer_id: Uuid,
        payload: CreateDomesticJobPayload,
    ) -> Result<DomesticJob> {
        let job = sqlx::query_as::<_, DomesticJob>(
            "INSERT INTO domestic_jobs (employer_id, title, service_category, location, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(employer_id)
        .bind(&payload.title)
        .bind(payload.service_category)
        .bind(&payload.location)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn list_active(&self, query: DomesticJobListQuery) -> Result<DomesticJobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let items = sqlx::query_as::<_, DomesticJob>(
            "SELECT * FROM domestic_jobs
             WHERE is_active = TRUE
             ORDER BY posted_on DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM domestic_jobs WHERE is_active = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;
        Ok(DomesticJobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Detail lookup is restricted to active postings, like the listing.
    pub async fn get_active(&self, id: Uuid) -> Result<DomesticJob> {
        let job = sqlx::query_as::<_, DomesticJob>(
            "SELECT * FROM domestic_jobs WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Domestic job not found".to_string()))?;
        Ok(job)
    }
}
