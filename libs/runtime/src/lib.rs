//! Process-level plumbing shared by ginchat binaries: layered configuration
//! and logging initialisation.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, CliArgs, ConfigError, DatabaseConfig, LoggingConfig, Section, ServerConfig};
