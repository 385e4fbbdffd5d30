// Configuration management module
// Loads the optional TOML file that locates the knowledge base

pub mod settings;

pub use settings::{Config, ConfigError, DatabaseConfig, LoaderConfig};

/// Get the configuration directory path
#[inline]
pub fn get_config_dir() -> Result<std::path::PathBuf, ConfigError> {
    Config::config_dir()
}
