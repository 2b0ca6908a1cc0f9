use muatten::AttenuationError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Attenuation(#[from] AttenuationError),

    #[error("Failed to parse configuration file '{path}': {source}", path = path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid {what}: '{input}' is not a number")]
    InvalidNumber { what: &'static str, input: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// The query failure behind this error, if any. Those are reported as a
    /// plain message with a zero exit status.
    pub fn query_error(&self) -> Option<&AttenuationError> {
        match self {
            CliError::Attenuation(e) if e.is_query_error() => Some(e),
            _ => None,
        }
    }
}
