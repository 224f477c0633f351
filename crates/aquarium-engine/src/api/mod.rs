pub mod config;
pub mod hooks;
pub mod types;
