use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThinkmodeError {
    #[error("API key is missing. Set GEMINI_API_KEY or provide a key for this session.")]
    MissingApiKey,

    #[error("Remote model returned status {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("Remote model call failed: {0}")]
    Remote(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Failed to register signal handler: {0}")]
    SignalHandler(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),
}

pub type Result<T> = std::result::Result<T, ThinkmodeError>;
