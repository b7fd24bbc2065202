use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::outgoing_email::OutgoingEmail;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingEmailResponse {
    pub id: Uuid,
    pub subject: String,
    pub body: String,
    pub to_emails: String,
    pub from_email: String,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OutgoingEmail> for OutgoingEmailResponse {
    fn from(email: OutgoingEmail) -> Self {
        Self {
            id: email.id,
            subject: email.subject,
            body: email.body,
            to_emails: email.to_emails,
            from_email: email.from_email,
            sent: email.sent,
            created_at: email.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmailListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sent: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailListResponse {
    pub items: Vec<OutgoingEmailResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendEmailsPayload {
    #[validate(length(min = 1))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendEmailsResponse {
    pub resent: u64,
}
