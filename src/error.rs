use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Argument(String),
    #[error("GitHub authentication failed: {status} {reason}\n{body}")]
    Auth {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("GitHub API error {status} {reason}\n{body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("GitHub transport error: {0}")]
    Transport(#[from] octocrab::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
