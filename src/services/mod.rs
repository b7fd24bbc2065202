pub mod account_service;
pub mod domestic_service;
pub mod job_service;
pub mod mail_service;
