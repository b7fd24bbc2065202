use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Audit record of every email the application attempted to send.
/// `sent` flips to true only on a confirmed transport success.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OutgoingEmail {
    pub id: Uuid,
    pub subject: String,
    pub body: String,
    /// Comma-joined recipient list, captured verbatim at send time.
    pub to_emails: String,
    pub from_email: String,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}
