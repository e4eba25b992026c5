use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed: {message}")]
    Fetch { message: String },

    #[error("Expected page structure not found: {0}")]
    StructuralMismatch(String),

    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Redirect link has no 'redirect=' marker: {0}")]
    MissingRedirectMarker(String),

    #[error("Import failed: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
