pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    account_service::AccountService,
    domestic_service::DomesticService,
    job_service::JobService,
    mail_service::{LogTransport, MailService, MailTransport},
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub account_service: AccountService,
    pub job_service: JobService,
    pub domestic_service: DomesticService,
    pub mail_service: MailService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self::with_transport(pool, Arc::new(LogTransport))
    }

    /// Tests swap the transport for a stub.
    pub fn with_transport(pool: PgPool, transport: Arc<dyn MailTransport>) -> Self {
        let account_service = AccountService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let domestic_service = DomesticService::new(pool.clone());
        let mail_service = MailService::new(pool.clone(), transport);

        Self {
            pool,
            account_service,
            job_service,
            domestic_service,
            mail_service,
        }
    }
}
