use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} responded with {status}")]
    Upstream { provider: String, status: String },

    #[error("{0} API key is not configured")]
    MissingApiKey(String),

    #[error("{provider} record is missing `{field}`")]
    MissingField { provider: String, field: &'static str },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn upstream(provider: impl Into<String>, status: impl ToString) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status: status.to_string(),
        }
    }

    pub fn missing_field(provider: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            provider: provider.into(),
            field,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
