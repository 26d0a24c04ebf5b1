pub mod attendee;
pub mod auth;
pub mod event;
pub mod user;
