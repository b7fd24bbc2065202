use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::account_dto::{
    PasswordResetConfirmPayload, RegisterCompanyPayload, RegisterDomesticWorkerPayload,
    RegisterEmployeePayload, RegisterHouseholdPayload, UpdateProfilePayload,
};
use crate::error::{Error, Result};
use crate::models::domestic::DomesticWorker;
use crate::models::password_reset::PasswordResetToken;
use crate::models::user::{Role, User};
use crate::services::mail_service::{MailMessage, MailService};
use crate::utils::{crypto, token};

const RESET_TOKEN_LENGTH: usize = 48;

#[derive(Clone)]
pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Generic job-seeker registration. Role is fixed to `employee`.
    pub async fn register_employee(&self, payload: RegisterEmployeePayload) -> Result<User> {
        let password_hash = hash(&payload.password)?;
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (
                email, password_hash, first_name, last_name, gender, role,
                phone_number, location, preferred_job_title, bio, skills, years_of_experience
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *",
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(payload.gender)
        .bind(Role::Employee)
        .bind(&payload.phone_number)
        .bind(&payload.location)
        .bind(&payload.preferred_job_title)
        .bind(&payload.bio)
        .bind(&payload.skills)
        .bind(payload.years_of_experience)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_email)?;
        Ok(user)
    }

    /// Households hire for their homes; they register as employers.
    pub async fn register_household(&self, payload: RegisterHouseholdPayload) -> Result<User> {
        let password_hash = hash(&payload.password)?;
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (
                email, password_hash, first_name, last_name, gender, role,
                phone_number, location
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(payload.gender)
        .bind(Role::Employer)
        .bind(&payload.phone_number)
        .bind(&payload.location)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_email)?;
        Ok(user)
    }

    pub async fn register_company(&self, payload: RegisterCompanyPayload) -> Result<User> {
        let password_hash = hash(&payload.password)?;
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (
                email, password_hash, first_name, last_name, role,
                company_name, company_website
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(Role::Employer)
        .bind(&payload.company_name)
        .bind(&payload.company_website)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_email)?;
        Ok(user)
    }

    /// User row and domestic-worker profile are created in one transaction;
    /// a failure on either side leaves no orphaned user behind.
    pub async fn register_domestic_worker(
        &self,
        payload: RegisterDomesticWorkerPayload,
    ) -> Result<(User, DomesticWorker)> {
        let password_hash = hash(&payload.password)?;
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (
                email, password_hash, first_name, last_name, gender, role, phone_number
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(payload.gender)
        .bind(Role::Employee)
        .bind(&payload.phone_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(duplicate_email)?;

        let worker = sqlx::query_as::<_, DomesticWorker>(
            "INSERT INTO domestic_workers (user_id, national_id, service_type)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user.id)
        .bind(&payload.national_id)
        .bind(payload.service_type)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match Error::from(err) {
            Error::AlreadyExists(_) => {
                Error::AlreadyExists("A worker with that national ID already exists".to_string())
            }
            other => other,
        })?;

        tx.commit().await?;
        Ok((user, worker))
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        let ok = crypto::verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }
        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        Ok(user)
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfilePayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone_number = COALESCE($4, phone_number),
                location = COALESCE($5, location),
                bio = COALESCE($6, bio),
                skills = COALESCE($7, skills),
                years_of_experience = COALESCE($8, years_of_experience),
                preferred_job_title = COALESCE($9, preferred_job_title),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.phone_number)
        .bind(&payload.location)
        .bind(&payload.bio)
        .bind(&payload.skills)
        .bind(payload.years_of_experience)
        .bind(&payload.preferred_job_title)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Record an uploaded CV path on an employee profile.
    pub async fn set_cv(&self, id: Uuid, path: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET cv = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(path)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Record an uploaded company logo path on an employer profile.
    pub async fn set_company_logo(&self, id: Uuid, path: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET company_logo = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(path)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Replace an employer's hiring-interest category set.
    pub async fn set_hiring_categories(&self, id: Uuid, categories: &[Uuid]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM user_hiring_categories WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for category_id in categories {
            sqlx::query(
                "INSERT INTO user_hiring_categories (user_id, category_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn hiring_categories(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT category_id FROM user_hiring_categories WHERE user_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Always succeeds from the caller's point of view so the endpoint does
    /// not reveal which emails exist. The reset mail goes through the audit
    /// layer; its outcome is logged and otherwise ignored.
    pub async fn request_password_reset(&self, email: &str, mail: &MailService) -> Result<()> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        let Some(user) = user else {
            info!(email = %email, "password reset requested for unknown email");
            return Ok(());
        };

        let config = crate::config::get_config();
        let reset_token = token::generate_reset_token(RESET_TOKEN_LENGTH);
        let expires_at = Utc::now() + Duration::minutes(config.reset_token_ttl_minutes);

        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(user.id)
        .bind(token::token_digest(&reset_token))
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        let outcome = mail
            .send(MailMessage {
                to: vec![user.email.clone()],
                subject: "Password reset requested".to_string(),
                body: format!(
                    "Hello {},\n\nUse the token below to reset your password. \
                     It expires in {} minutes.\n\n{}\n",
                    user.first_name, config.reset_token_ttl_minutes, reset_token
                ),
                from: config.mail_from.clone(),
            })
            .await;
        info!(user_id = %user.id, ?outcome, "password reset email dispatched");
        Ok(())
    }

    pub async fn confirm_password_reset(&self, payload: PasswordResetConfirmPayload) -> Result<()> {
        let digest = token::token_digest(&payload.token);
        let record = sqlx::query_as::<_, PasswordResetToken>(
            "SELECT * FROM password_reset_tokens WHERE token_hash = $1",
        )
        .bind(&digest)
        .fetch_optional(&self.pool)
        .await?
        .filter(|record| token::digests_match(&record.token_hash, &digest))
        .ok_or_else(|| Error::BadRequest("Invalid or expired reset token".to_string()))?;

        if record.used || record.expires_at < Utc::now() {
            return Err(Error::BadRequest("Invalid or expired reset token".to_string()));
        }

        let password_hash = hash(&payload.password)?;
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(record.user_id)
            .bind(&password_hash)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE password_reset_tokens SET used = TRUE WHERE id = $1")
            .bind(record.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

fn hash(plain: &str) -> Result<String> {
    crypto::hash_password(plain).map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

fn duplicate_email(err: sqlx::Error) -> Error {
    match Error::from(err) {
        Error::AlreadyExists(_) => {
            Error::AlreadyExists("A user with that email already exists".to_string())
        }
        other => other,
    }
}
