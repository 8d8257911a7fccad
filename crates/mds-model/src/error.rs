use thiserror::Error;

#[derive(Debug, Error)]
pub enum MdsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

impl MdsError {
    /// Convenience constructor for boundary errors carried as text.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }
}

pub type Result<T> = std::result::Result<T, MdsError>;
