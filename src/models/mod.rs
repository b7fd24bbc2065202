pub mod domestic;
pub mod job;
pub mod outgoing_email;
pub mod password_reset;
pub mod user;
