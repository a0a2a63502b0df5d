//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while talking to OpenRouter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error("failed to create OpenRouter client: {0}")]
    Setup(String),
    #[error("OpenRouter API error: {0}")]
    Api(String),
    #[error("no response choices received")]
    EmptyResponse,
}

/// Quiz generation failed or returned a reply that breaks the quiz contract.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("quiz reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("quiz reply violates the contract: {0}")]
    Contract(String),
}

/// Grading failed or returned a reply that breaks the results contract.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GradingError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("grading reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("grading reply violates the contract: {0}")]
    Contract(String),
    #[error("answers do not match the quiz: {0}")]
    AnswerMismatch(String),
}

/// Operations the session controller refuses to perform.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a request is already in flight")]
    Busy,
    #[error("operation not available on the current screen")]
    WrongScreen,
    #[error("every question must be answered before submitting")]
    IncompleteAnswers,
    #[error("question {question} has no option {option}")]
    InvalidSelection { question: usize, option: usize },
}

/// Startup configuration problems. These are fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
