use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("failed to decode {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
