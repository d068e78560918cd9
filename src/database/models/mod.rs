pub mod blog;
pub mod inquiry;
pub mod property;
pub mod user;
