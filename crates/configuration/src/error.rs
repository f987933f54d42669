use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config.toml: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid analytics parameters: {0}")]
    ValidationError(String),
}
