use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CreateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("could not generate a unique short code, please retry")]
    GenerationExhausted,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}
