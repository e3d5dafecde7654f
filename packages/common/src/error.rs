use thiserror::Error;

/// Errors raised while loading shared livepad configuration
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    InvalidConfig {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
