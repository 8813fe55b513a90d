use thiserror::Error;

pub type BrewResult<T> = Result<T, BrewError>;

#[derive(Error, Debug)]
pub enum BrewError {
    /// The upstream server answered 404.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// The upstream server answered with a status other than 200 or 404.
    #[error("Upstream returned HTTP {status} for {url}")]
    Upstream { status: u16, url: String },

    /// The request never produced a response (timeout, refused, reset).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Valid JSON that does not have the formula shape we rely on.
    #[error("Unexpected formula schema: {0}")]
    Schema(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Invalid package identifier: {0}")]
    InvalidPackage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BrewError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Lookups are never retried internally; this lets callers pick a policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            BrewError::Transport(_) => true,
            BrewError::Upstream { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
