pub mod attendance;
pub mod organization;
pub mod schedule;
pub mod user;
