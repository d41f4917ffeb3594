use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No entry for key '{0}'")]
    MissingKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
