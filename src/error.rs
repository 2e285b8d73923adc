use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid index format: {0}")]
    InvalidIndexFormat(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Trie and index out of sync: token {0:?} is not indexed")]
    Inconsistent(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for IndexError {
    fn from(err: std::io::Error) -> Self {
        IndexError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
