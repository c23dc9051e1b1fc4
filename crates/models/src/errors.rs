use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot parse id: {0}")]
    InvalidId(String),
    #[error("decode error: {0}")]
    Decode(String),
}
