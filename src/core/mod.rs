pub mod api;
pub mod config;
pub mod download;
pub mod extension;
pub mod state;
