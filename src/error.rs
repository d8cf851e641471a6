use thiserror::Error;

/// Errors that can occur while fetching a random recipe
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The network exchange could not be completed (connectivity, timeout, DNS)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status code
    #[error("{message}")]
    Protocol { status: u16, message: String },

    /// Anything else, including a response body that could not be decoded
    #[error("{0}")]
    Unclassified(String),
}

impl FetchError {
    /// Text shown in `UiState::Error` for this fault.
    pub fn ui_message(&self) -> String {
        match self {
            FetchError::Transport(cause) => format!("Network error: {}", cause),
            FetchError::Protocol { message, .. } => format!("HTTP error: {}", message),
            FetchError::Unclassified(cause) => format!("Failed to fetch recipe: {}", cause),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            FetchError::Transport(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Protocol {
                status: status.as_u16(),
                message: status.to_string(),
            }
        } else {
            FetchError::Unclassified(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Unclassified(err.to_string())
    }
}

/// Errors raised while setting up the application around the state machine
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// The HTTP client could not be built
    #[error("Client error: {0}")]
    ClientError(#[from] FetchError),

    /// Reading commands from the terminal failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
