use thiserror::Error;

use crate::loader::RecordRejection;

pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Record {index} rejected: {preview}... - {reason}")]
    RecordRejected {
        index: usize,
        preview: String,
        reason: String,
    },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl LoaderError {
    /// Wrap a store-level failure, keeping the full context chain in the message
    #[inline]
    pub fn store_unavailable(error: &anyhow::Error) -> Self {
        Self::StoreUnavailable(format!("{error:#}"))
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::RecordRejected { .. })
    }
}

impl From<RecordRejection> for LoaderError {
    #[inline]
    fn from(rejection: RecordRejection) -> Self {
        Self::RecordRejected {
            index: rejection.index,
            preview: rejection.question_preview,
            reason: rejection.reason,
        }
    }
}

pub mod catalog;
pub mod commands;
pub mod config;
pub mod database;
pub mod loader;
