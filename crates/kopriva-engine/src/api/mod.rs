pub mod app;
pub mod config;
pub mod host;
pub mod types;
