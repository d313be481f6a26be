use kinodata::datasets::config::ConfigError;
use kinodata::datasets::provider::ProviderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize docs tree: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
