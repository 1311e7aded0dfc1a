use thiserror::Error;

use crate::decode::DecodeError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("html conversion failed: {0}")]
    Pipeline(String),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard access failed: {0}")]
    Access(String),
    #[error("clipboard item advertises {0} but returned no data")]
    MissingData(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to persist document: {0}")]
    Persist(String),
}
