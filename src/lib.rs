// Library module for declutter
// Re-exports modules for use by the binary and integration tests

pub mod browse;
pub mod cleaner;
pub mod cleanup;
pub mod config;
pub mod disk_info;
pub mod error;
pub mod server;
pub mod utils;
