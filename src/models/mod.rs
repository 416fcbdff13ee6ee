pub mod config;
pub mod context;
pub mod errors;
pub mod products;
pub mod wishlists;
