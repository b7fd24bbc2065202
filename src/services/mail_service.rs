use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::mail_dto::EmailListQuery;
use crate::error::Result;
use crate::models::outgoing_email::OutgoingEmail;

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub from: String,
}

/// Attempt delivery of a single message, reporting success. The application
/// runs against a development transport that only logs; the audit trail in
/// `outgoing_emails` is the durable record either way.
#[cfg_attr(test, mockall::automock)]
pub trait MailTransport: Send + Sync {
    fn send(&self, message: &MailMessage) -> bool;
}

/// Development transport: writes the message to the log and reports success.
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn send(&self, message: &MailMessage) -> bool {
        info!(
            to = %message.to.join(","),
            from = %message.from,
            subject = %message.subject,
            body = %message.body,
            "outgoing email"
        );
        true
    }
}

/// Explicit outcome of one send attempt. Callers decide whether to log,
/// alert, or ignore; user-facing flows never fail on mail problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Audit record written and transport confirmed delivery.
    Sent(Uuid),
    /// Audit record written but the transport declined or failed.
    PersistedNotSent(Uuid),
    /// Persistence failed; the transport was still attempted.
    NotPersisted { transported: bool },
}

pub struct MailList {
    pub items: Vec<OutgoingEmail>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Clone)]
pub struct MailService {
    pool: PgPool,
    transport: Arc<dyn MailTransport>,
}

/// Split a stored comma-joined recipient string back into addresses,
/// trimming whitespace and dropping empty or address-less entries.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && part.contains('@'))
        .map(str::to_string)
        .collect()
}

impl MailService {
    pub fn new(pool: PgPool, transport: Arc<dyn MailTransport>) -> Self {
        Self { pool, transport }
    }

    /// Audit-then-forward. The record is inserted with `sent = false` before
    /// any transport attempt; `sent` flips only on confirmed delivery.
    pub async fn send(&self, message: MailMessage) -> DeliveryOutcome {
        let to_emails = message.to.join(",");

        let persisted: Option<Uuid> = match sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO outgoing_emails (subject, body, to_emails, from_email, sent)
             VALUES ($1, $2, $3, $4, FALSE)
             RETURNING id",
        )
        .bind(&message.subject)
        .bind(&message.body)
        .bind(&to_emails)
        .bind(&message.from)
        .fetch_one(&self.pool)
        .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                // Never block the user flow on audit problems.
                warn!(error = %err, "failed to persist outgoing email");
                None
            }
        };

        let transported = self.transport.send(&message);

        match (persisted, transported) {
            (Some(id), true) => {
                if let Err(err) =
                    sqlx::query("UPDATE outgoing_emails SET sent = TRUE WHERE id = $1")
                        .bind(id)
                        .execute(&self.pool)
                        .await
                {
                    warn!(error = %err, email_id = %id, "failed to mark email sent");
                }
                DeliveryOutcome::Sent(id)
            }
            (Some(id), false) => DeliveryOutcome::PersistedNotSent(id),
            (None, transported) => DeliveryOutcome::NotPersisted { transported },
        }
    }

    /// Re-attempt delivery for stored records. Records with an empty or
    /// malformed recipient list are skipped without a transport attempt;
    /// per-record failures never abort the batch. Returns the number of
    /// records whose `sent` flag was flipped.
    pub async fn resend(&self, ids: &[Uuid]) -> Result<u64> {
        let mut resent = 0u64;
        for &id in ids {
            let record = match sqlx::query_as::<_, OutgoingEmail>(
                "SELECT * FROM outgoing_emails WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            {
                Ok(Some(record)) => record,
                Ok(None) => {
                    warn!(email_id = %id, "resend requested for unknown email");
                    continue;
                }
                Err(err) => {
                    warn!(error = %err, email_id = %id, "failed to load email for resend");
                    continue;
                }
            };

            match attempt_redelivery(self.transport.as_ref(), &record) {
                None => continue,
                Some(false) => continue,
                Some(true) => {
                    match sqlx::query("UPDATE outgoing_emails SET sent = TRUE WHERE id = $1")
                        .bind(id)
                        .execute(&self.pool)
                        .await
                    {
                        Ok(_) => resent += 1,
                        Err(err) => {
                            warn!(error = %err, email_id = %id, "failed to mark email resent")
                        }
                    }
                }
            }
        }
        Ok(resent)
    }

    pub async fn list(&self, query: EmailListQuery) -> Result<MailList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let (where_clause, bind_sent) = match query.sent {
            Some(_) => ("WHERE sent = $3", true),
            None => ("", false),
        };

        let items_query = format!(
            "SELECT * FROM outgoing_emails {} ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            where_clause
        );
        let mut items_statement = sqlx::query_as::<_, OutgoingEmail>(&items_query)
            .bind(per_page)
            .bind(offset);
        if bind_sent {
            items_statement = items_statement.bind(query.sent.unwrap_or_default());
        }
        let items = items_statement.fetch_all(&self.pool).await?;

        let total_query = format!(
            "SELECT COUNT(*) FROM outgoing_emails {}",
            where_clause.replace("$3", "$1")
        );
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        if bind_sent {
            total_statement = total_statement.bind(query.sent.unwrap_or_default());
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(MailList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}

/// Parse the stored recipients and, when any survive, hand the message to
/// the transport. `None` means the record was skipped (no valid recipients).
fn attempt_redelivery(transport: &dyn MailTransport, record: &OutgoingEmail) -> Option<bool> {
    let to = parse_recipients(&record.to_emails);
    if to.is_empty() {
        return None;
    }
    let message = MailMessage {
        to,
        subject: record.subject.clone(),
        body: record.body.clone(),
        from: record.from_email.clone(),
    };
    Some(transport.send(&message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(to_emails: &str) -> OutgoingEmail {
        OutgoingEmail {
            id: Uuid::new_v4(),
            subject: "Reset your password".into(),
            body: "Use this link".into(),
            to_emails: to_emails.into(),
            from_email: "noreply@localhost".into(),
            sent: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parse_recipients_trims_and_drops_junk() {
        assert_eq!(
            parse_recipients(" a@x.com , ,b@y.com,not-an-address,"),
            vec!["a@x.com".to_string(), "b@y.com".to_string()]
        );
        assert!(parse_recipients("").is_empty());
        assert!(parse_recipients(" , ,").is_empty());
    }

    #[test]
    fn redelivery_skips_empty_recipient_list() {
        let mut transport = MockMailTransport::new();
        transport.expect_send().times(0);
        assert_eq!(attempt_redelivery(&transport, &record("")), None);
        assert_eq!(attempt_redelivery(&transport, &record(" , ")), None);
    }

    #[test]
    fn redelivery_reports_transport_result() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_send()
            .withf(|m| m.to == ["a@x.com"])
            .times(1)
            .return_const(true);
        assert_eq!(attempt_redelivery(&transport, &record("a@x.com")), Some(true));

        let mut failing = MockMailTransport::new();
        failing.expect_send().times(1).return_const(false);
        assert_eq!(
            attempt_redelivery(&failing, &record("a@x.com")),
            Some(false)
        );
    }

    #[test]
    fn log_transport_reports_success() {
        let message = MailMessage {
            to: vec!["a@x.com".into()],
            subject: "s".into(),
            body: "b".into(),
            from: "f@x.com".into(),
        };
        assert!(LogTransport.send(&message));
    }
}
