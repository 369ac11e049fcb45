use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{program} binary not found in PATH")]
    BinaryNotFound { program: String },
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("encoder process failed (exit_code={exit_code:?})")]
    ProcessFailed { exit_code: Option<i32> },
    #[error("invalid input path: {}", path.display())]
    InvalidInput { path: PathBuf },
    #[error("no input path given; pass --path or use the cached directory")]
    MissingPath,
    #[error("no cached directory available")]
    NoCachedDirectory,
    #[error("cache file {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScriptError::Io {
            path: path.into(),
            source,
        }
    }
}
