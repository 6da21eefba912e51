use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdPilotError {
    #[error("API credential not configured")]
    MissingCredential,

    #[error("LLM request failed: {0}")]
    LlmError(String),

    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("Failed to parse structured output: {0}")]
    ParseError(String),

    #[error("Expected a JSON {expected} but got {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AdPilotError {
    fn from(err: serde_json::Error) -> Self {
        AdPilotError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdPilotError>;
