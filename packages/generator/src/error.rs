//! Error types for snippet generation

use thiserror::Error;

pub type GenerationResult<T> = Result<T, GenerationError>;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid generation response: {0}")]
    Decode(String),
}
