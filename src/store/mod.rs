pub mod cache;
pub mod database;
