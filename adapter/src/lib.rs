pub mod database;
mod password;
pub mod redis;
pub mod repository;
