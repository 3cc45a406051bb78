use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Window must span at least one day, got {0}")]
    InvalidWindow(i64),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Failed to read timezone file {path}: {source}")]
    TimezoneFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
