//! Errors surfaced by the replay binary.

use std::path::PathBuf;

use canvas::doc::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read script {}: {source}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("event {index}: template size must be positive integers (got {width}x{height})")]
    InvalidTemplateSize { index: usize, width: i64, height: i64 },
    #[error("event {index}: template color must not be empty")]
    EmptyColor { index: usize },
    #[error("event {index}: no box with key {key} on the canvas")]
    UnknownBox { index: usize, key: u64 },
    #[error("event {index}: no template with key {key} in the sidebar")]
    UnknownTemplate { index: usize, key: u64 },
    #[error("store rejected the template: {0}")]
    Store(#[from] StoreError),
}
