pub mod application;
pub mod job;
pub mod reminder;
pub mod resume;
pub mod user;
