use thiserror::Error;

/// Error types for tnotify operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required flag was empty or missing
    #[error("{0}")]
    MissingFlag(String),

    /// HTTP client error (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be read
    #[error("Couldn't read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The response body is not a valid API envelope
    #[error("Couldn't decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response could not be echoed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// API error from Telegram (`ok` is false)
    #[error("Telegram API error: {0}")]
    Api(String),
}

impl Error {
    /// Create a new missing flag error
    pub fn missing_flag<S: AsRef<str>>(message: S) -> Self {
        Error::MissingFlag(message.as_ref().to_string())
    }

    /// Create a new API error
    pub fn api<S: AsRef<str>>(message: S) -> Self {
        Error::Api(message.as_ref().to_string())
    }

    /// Whether this error was raised before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingFlag(_))
    }
}
