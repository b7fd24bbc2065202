pub mod crypto;
pub mod token;
pub mod uploads;
