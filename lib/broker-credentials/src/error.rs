use thiserror::Error;

pub type Result<T> = std::result::Result<T, CredentialsError>;

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Invalid builder configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
