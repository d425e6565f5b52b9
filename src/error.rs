use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("a submission is already in progress")]
    SubmissionPending,
    #[error("{0}")]
    GatewayRejection(String),
    #[error("could not reach the payment service: {0}")]
    Transport(String),
    #[error("transaction not found")]
    NotFound,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
