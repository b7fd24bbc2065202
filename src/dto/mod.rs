pub mod account_dto;
pub mod domestic_dto;
pub mod job_dto;
pub mod mail_dto;
