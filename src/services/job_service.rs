use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{
    CreateJobPayload, JobListQuery, JobSearchQuery, JobWithApplicantCount, UpdateJobPayload,
};
use crate::error::{Error, Result};
use crate::models::job::{Applicant, Bookmark, Category, Job};

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct JobApplicant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub struct HomeStats {
    pub total_candidates: i64,
    pub total_companies: i64,
    pub total_jobs: i64,
    pub total_completed_jobs: i64,
    pub recent_jobs: Vec<Job>,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner: Uuid, payload: CreateJobPayload) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (
                user_id, title, description, tags, location, job_type,
                experience_level, work_arrangement, category_id, salary, benefits,
                company_name, company_description, url, last_date
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING *",
        )
        .bind(owner)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.tags)
        .bind(&payload.location)
        .bind(payload.job_type)
        .bind(payload.experience_level)
        .bind(payload.work_arrangement)
        .bind(payload.category_id)
        .bind(&payload.salary)
        .bind(&payload.benefits)
        .bind(&payload.company_name)
        .bind(&payload.company_description)
        .bind(&payload.url)
        .bind(payload.last_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, owner: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        self.get_owned(id, owner).await?;

        let job = sqlx::query_as::<_, Job>(
            "UPDATE jobs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tags = COALESCE($4, tags),
                location = COALESCE($5, location),
                job_type = COALESCE($6, job_type),
                experience_level = COALESCE($7, experience_level),
                work_arrangement = COALESCE($8, work_arrangement),
                category_id = COALESCE($9, category_id),
                salary = COALESCE($10, salary),
                benefits = COALESCE($11, benefits),
                company_name = COALESCE($12, company_name),
                company_description = COALESCE($13, company_description),
                url = COALESCE($14, url),
                last_date = COALESCE($15, last_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.tags)
        .bind(&payload.location)
        .bind(payload.job_type)
        .bind(payload.experience_level)
        .bind(payload.work_arrangement)
        .bind(payload.category_id)
        .bind(&payload.salary)
        .bind(&payload.benefits)
        .bind(&payload.company_name)
        .bind(&payload.company_description)
        .bind(&payload.url)
        .bind(payload.last_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid, owner: Uuid) -> Result<()> {
        self.get_owned(id, owner).await?;
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// One-way transition: there is no reopen path.
    pub async fn close(&self, id: Uuid, owner: Uuid) -> Result<Job> {
        self.get_owned(id, owner).await?;
        let job = sqlx::query_as::<_, Job>(
            "UPDATE jobs SET is_closed = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn publish(&self, id: Uuid, owner: Uuid) -> Result<Job> {
        self.get_owned(id, owner).await?;
        let job = sqlx::query_as::<_, Job>(
            "UPDATE jobs SET is_published = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job posting not found".to_string()))?;
        Ok(job)
    }

    async fn get_owned(&self, id: Uuid, owner: Uuid) -> Result<Job> {
        let job = self.get_by_id(id).await?;
        if job.user_id != owner {
            return Err(Error::Forbidden(
                "Only the posting employer can modify this job".to_string(),
            ));
        }
        Ok(job)
    }

    pub async fn applicant_count(&self, id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applicants WHERE job_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Default listing: published, not closed, newest first unless the
    /// client picked another sort key.
    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(12).clamp(1, 100);
        let offset = (page - 1) * per_page;
        let order = query.sort_by.unwrap_or_default().order_clause();

        let items_query = format!(
            "SELECT * FROM jobs
             WHERE is_published = TRUE AND is_closed = FALSE
             ORDER BY {}
             LIMIT $1 OFFSET $2",
            order
        );
        let items = sqlx::query_as::<_, Job>(&items_query)
            .bind(per_page)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jobs WHERE is_published = TRUE AND is_closed = FALSE",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;
        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Conjunctive optional filters over the published-and-open set.
    pub async fn search(&self, query: JobSearchQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = vec!["is_published = TRUE".to_string(), "is_closed = FALSE".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(needle) = query.job_title_or_company_name.filter(|s| !s.is_empty()) {
            let first = args.len() + 1;
            let second = first + 1;
            filters.push(format!(
                "(title ILIKE ${} OR company_name ILIKE ${})",
                first, second
            ));
            args.push(format!("%{}%", needle));
            args.push(format!("%{}%", needle));
        }
        if let Some(location) = query.location.filter(|s| !s.is_empty()) {
            filters.push(format!("location ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", location));
        }
        if let Some(job_type) = query.job_type {
            filters.push(format!("job_type = ${}::job_type", args.len() + 1));
            args.push(job_type.as_str().to_string());
        }
        if let Some(level) = query.experience_level {
            filters.push(format!(
                "experience_level = ${}::experience_level",
                args.len() + 1
            ));
            args.push(level.as_str().to_string());
        }
        if let Some(arrangement) = query.work_arrangement {
            filters.push(format!(
                "work_arrangement = ${}::work_arrangement",
                args.len() + 1
            ));
            args.push(arrangement.as_str().to_string());
        }

        let where_clause = format!("WHERE {}", filters.join(" AND "));
        let items_query = format!(
            "SELECT * FROM jobs
             {}
             ORDER BY created_at DESC
             LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;
        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Uniqueness comes from the (user_id, job_id) constraint, not a
    /// pre-check query; a duplicate surfaces as `AlreadyExists`.
    pub async fn apply(&self, user_id: Uuid, job_id: Uuid) -> Result<Applicant> {
        self.get_by_id(job_id).await?;
        let applicant = sqlx::query_as::<_, Applicant>(
            "INSERT INTO applicants (user_id, job_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match Error::from(err) {
            Error::AlreadyExists(_) => {
                Error::AlreadyExists("You have already applied for this job".to_string())
            }
            other => other,
        })?;
        Ok(applicant)
    }

    pub async fn bookmark(&self, user_id: Uuid, job_id: Uuid) -> Result<Bookmark> {
        self.get_by_id(job_id).await?;
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "INSERT INTO bookmarks (user_id, job_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match Error::from(err) {
            Error::AlreadyExists(_) => {
                Error::AlreadyExists("You have already saved this job".to_string())
            }
            other => other,
        })?;
        Ok(bookmark)
    }

    pub async fn unbookmark(&self, user_id: Uuid, bookmark_id: Uuid) -> Result<()> {
        let bookmark =
            sqlx::query_as::<_, Bookmark>("SELECT * FROM bookmarks WHERE id = $1")
                .bind(bookmark_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Saved job not found".to_string()))?;
        if bookmark.user_id != user_id {
            return Err(Error::Forbidden(
                "Only the owner can remove a saved job".to_string(),
            ));
        }
        sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(bookmark_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn applicants_for_job(&self, job_id: Uuid, owner: Uuid) -> Result<Vec<JobApplicant>> {
        self.get_owned(job_id, owner).await?;
        let applicants = sqlx::query_as::<_, JobApplicant>(
            "SELECT a.id, a.user_id, u.first_name, u.last_name, u.email, a.created_at
             FROM applicants a
             JOIN users u ON u.id = a.user_id
             WHERE a.job_id = $1
             ORDER BY a.created_at ASC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applicants)
    }

    pub async fn employer_dashboard(&self, owner: Uuid) -> Result<Vec<JobWithApplicantCount>> {
        let jobs = sqlx::query_as::<_, JobWithApplicantCount>(
            "SELECT j.id, j.title, j.location, j.job_type, j.is_published, j.is_closed,
                    j.created_at, COUNT(a.id) AS applicant_count
             FROM jobs j
             LEFT JOIN applicants a ON a.job_id = j.id
             WHERE j.user_id = $1
             GROUP BY j.id
             ORDER BY j.created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn employee_dashboard(&self, user_id: Uuid) -> Result<(Vec<Job>, Vec<Job>)> {
        let applied = sqlx::query_as::<_, Job>(
            "SELECT j.* FROM jobs j
             JOIN applicants a ON a.job_id = j.id
             WHERE a.user_id = $1
             ORDER BY a.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        let saved = sqlx::query_as::<_, Job>(
            "SELECT j.* FROM jobs j
             JOIN bookmarks b ON b.job_id = j.id
             WHERE b.user_id = $1
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok((applied, saved))
    }

    pub async fn home_stats(&self, recent_limit: i64) -> Result<HomeStats> {
        let total_candidates = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE role = 'employee'",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_companies = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE role = 'employer'",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_jobs = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jobs WHERE is_published = TRUE AND is_closed = FALSE",
        )
        .fetch_one(&self.pool)
        .await?;
        let total_completed_jobs = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jobs WHERE is_published = TRUE AND is_closed = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;
        let recent_jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs
             WHERE is_published = TRUE AND is_closed = FALSE
             ORDER BY created_at DESC
             LIMIT $1",
        )
        .bind(recent_limit.clamp(1, 50))
        .fetch_all(&self.pool)
        .await?;

        Ok(HomeStats {
            total_candidates,
            total_companies,
            total_jobs,
            total_completed_jobs,
            recent_jobs,
        })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match Error::from(err) {
            Error::AlreadyExists(_) => {
                Error::AlreadyExists("A category with that name already exists".to_string())
            }
            other => other,
        })?;
        Ok(category)
    }
}
