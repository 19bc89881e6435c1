// Library interface for the bookmark exporter
// This allows tests and external crates to use the exporter components

pub mod bookmarks;
pub mod catalog;
pub mod config;
pub mod exporter;
pub mod http_client;
pub mod models;
pub mod status;
