pub mod aggregator;
pub mod catalog;
pub mod models;
pub mod resolver;
pub mod server;
pub mod store;
pub mod telemetry;
