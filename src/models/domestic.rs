use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Service categories shared by worker profiles and domestic job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "service_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Housemaid,
    Gatekeeper,
    Saloonist,
    Barber,
    Gardener,
    Driver,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DomesticWorker {
    pub id: Uuid,
    pub user_id: Uuid,
    pub national_id: String,
    pub service_type: ServiceType,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DomesticJob {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub service_category: ServiceType,
    pub location: String,
    pub description: String,
    pub is_active: bool,
    pub posted_on: DateTime<Utc>,
}
