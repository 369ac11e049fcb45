//! Last-used batch directory, kept between runs.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::ScriptError;

const APP_DIR: &str = "ffscripts";
const CACHE_FILE: &str = "cache";

pub trait DirectoryCache {
    fn get(&self) -> Result<String, ScriptError>;
    fn set(&mut self, directory: &str) -> Result<(), ScriptError>;
}

/// Holds one line: the directory most recently passed to a batch encode.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<user data dir>/ffscripts/cache`, or the working directory if the
    /// platform has no data dir.
    pub fn default_location() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_default()
            .join(APP_DIR)
            .join(CACHE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn cache_err(&self, source: io::Error) -> ScriptError {
        ScriptError::Cache {
            path: self.path.clone(),
            source,
        }
    }
}

impl DirectoryCache for FileCache {
    fn get(&self) -> Result<String, ScriptError> {
        let file = fs::File::open(&self.path).map_err(|e| self.cache_err(e))?;
        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|e| self.cache_err(e))?;
        Ok(line.trim().to_string())
    }

    fn set(&mut self, directory: &str) -> Result<(), ScriptError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.cache_err(e))?;
            }
        }
        fs::write(&self.path, format!("{directory}\n")).map_err(|e| self.cache_err(e))?;
        debug!(cache = %self.path.display(), "wrote cached directory");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    value: Option<String>,
}

#[cfg(test)]
impl MemoryCache {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

#[cfg(test)]
impl DirectoryCache for MemoryCache {
    fn get(&self) -> Result<String, ScriptError> {
        self.value.clone().ok_or_else(|| ScriptError::Cache {
            path: PathBuf::from("<memory>"),
            source: io::Error::new(io::ErrorKind::NotFound, "nothing cached"),
        })
    }

    fn set(&mut self, directory: &str) -> Result<(), ScriptError> {
        self.value = Some(directory.to_string());
        Ok(())
    }
}

/// Reads the cached directory. Missing and unreadable caches both give an
/// empty string.
pub fn cached_directory(cache: &dyn DirectoryCache) -> String {
    match cache.get() {
        Ok(directory) => {
            debug!(directory = %directory, "using cached directory");
            directory
        }
        Err(err) => {
            warn!("could not read cached directory: {err}");
            String::new()
        }
    }
}

/// Stores `directory`; a failed write is logged and otherwise ignored.
pub fn remember_directory(cache: &mut dyn DirectoryCache, directory: &str) {
    if let Err(err) = cache.set(directory) {
        warn!("could not update cached directory: {err}");
    }
}
