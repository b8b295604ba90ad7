pub mod api;
pub mod config;
pub mod event;
pub mod host;
pub mod manifest;
pub mod plugin;
