use bookstore_core::ApiError;
use thiserror::Error;

/// Why a scenario did not pass.
///
/// Expected validation outcomes are not errors; a `CheckFailure` means the
/// service answered differently from its contract, or the call itself failed.
#[derive(Debug, Error)]
pub enum CheckFailure {
    #[error("expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus { expected: u16, actual: u16, body: String },

    #[error("status {status} must not be returned here: {body}")]
    ForbiddenStatus { status: u16, body: String },

    #[error("{0}")]
    Assertion(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures that stop a suite before its scenarios can run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("fixture setup failed: {0}")]
    Setup(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("log file: {0}")]
    Io(#[from] std::io::Error),
}
