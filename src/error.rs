use crate::controller::SubmitBlock;

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Any backend failure: transport error, non-success status or malformed body
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Submission disabled: {0}")]
    SubmitDisabled(SubmitBlock),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::RequestFailed(format!("malformed response body: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
