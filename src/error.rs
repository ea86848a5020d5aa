use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed gateway response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("gateway returned unrecognized status code {0}")]
    UnknownStatus(u32),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
