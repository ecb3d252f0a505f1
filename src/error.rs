use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Geocoder error: {message}")]
    Geocoder { message: String },

    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    #[error("Phone number error: {0}")]
    Phone(String),

    #[error("Uncleanable value: {0}")]
    Uncleanable(String),

    #[error("Invalid pipeline: {0}")]
    InvalidPipeline(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, CleanerError>;
