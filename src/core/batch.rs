use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::cache::{cached_directory, remember_directory, DirectoryCache};
use crate::core::command::{EncodeSettings, Invocation};
use crate::core::error::ScriptError;
use crate::core::job::{BatchReport, Job, JobStatus};
use crate::core::runner::Invoker;

/// Masters to encode, under the batch root.
pub const SOURCE_DIR: &str = "mezzanine";
/// Encoded outputs, under the batch root.
pub const DESTINATION_DIR: &str = "post";

#[derive(Debug, Clone)]
pub struct BatchJob {
    pub source_directory: PathBuf,
    pub destination_directory: PathBuf,
    pub settings: EncodeSettings,
}

impl BatchJob {
    pub fn new(root: &Path, settings: EncodeSettings) -> Self {
        Self {
            source_directory: root.join(SOURCE_DIR),
            destination_directory: root.join(DESTINATION_DIR),
            settings,
        }
    }
}

/// Removes `suffix` once, and only when `stem` ends with it. `None` when the
/// stem can't be inspected without a lossy conversion.
#[cfg(unix)]
pub fn strip_stem_suffix<'a>(stem: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    use std::os::unix::ffi::OsStrExt;

    let bytes = stem.as_bytes();
    let base = bytes.strip_suffix(suffix.as_bytes()).unwrap_or(bytes);
    Some(OsStr::from_bytes(base))
}

#[cfg(not(unix))]
pub fn strip_stem_suffix<'a>(stem: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    stem.to_str().map(|s| OsStr::new(s.strip_suffix(suffix).unwrap_or(s)))
}

/// True when the file name ends with `suffix`, compared byte for byte.
pub fn name_ends_with(name: &OsStr, suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// `dir/clip-master.mov` with suffix `-master` and `.mp4` gives `clip.mp4`.
pub fn output_name(input: &Path, suffix: &str, extension: &str) -> Result<OsString, ScriptError> {
    let invalid = || ScriptError::InvalidInput {
        path: input.to_path_buf(),
    };
    let stem = input.file_stem().ok_or_else(invalid)?;
    let mut name = strip_stem_suffix(stem, suffix).ok_or_else(invalid)?.to_os_string();
    name.push(extension);
    Ok(name)
}

/// Regular files directly inside `dir`, sorted by name. Anything else is
/// skipped.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, ScriptError> {
    let entries = fs::read_dir(dir).map_err(|e| ScriptError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ScriptError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(entry = %path.display(), "skipping non-file entry");
        }
    }
    files.sort();
    Ok(files)
}

/// Runs each invocation in order. A failure is recorded on its job and the
/// loop moves on.
pub fn run_jobs(invocations: Vec<Invocation>, invoker: &mut dyn Invoker) -> BatchReport {
    let mut report = BatchReport::default();

    for invocation in invocations {
        let mut job = Job::new(invocation.input.clone(), invocation.output.clone());
        job.status = JobStatus::Running;
        job.started_at = Some(Instant::now());

        let result = invoker.invoke(&invocation);
        job.ended_at = Some(Instant::now());

        match result {
            Ok(()) => job.status = JobStatus::Finished,
            Err(err) => {
                warn!(input = %job.input.display(), "{err}");
                job.status = JobStatus::Failed;
                job.error = Some(err.to_string());
            }
        }
        report.jobs.push(job);
    }

    report
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Picks the batch root: the cached one, or `path`, which then becomes the
/// new cached value.
pub fn resolve_root(
    path: Option<&Path>,
    use_cached: bool,
    cache: &mut dyn DirectoryCache,
) -> Result<PathBuf, ScriptError> {
    if use_cached {
        let cached = cached_directory(cache);
        if cached.is_empty() {
            return Err(ScriptError::NoCachedDirectory);
        }
        info!("using cached directory {cached}");
        return Ok(PathBuf::from(cached));
    }

    let root = absolute(path.ok_or(ScriptError::MissingPath)?);
    match root.to_str() {
        Some(directory) => remember_directory(cache, directory),
        None => warn!(root = %root.display(), "path is not valid UTF-8, not caching it"),
    }
    Ok(root)
}

pub fn run_batch(
    job: &BatchJob,
    invoker: &mut dyn Invoker,
) -> Result<BatchReport, ScriptError> {
    let inputs = list_files(&job.source_directory)?;
    if inputs.is_empty() {
        info!(source = %job.source_directory.display(), "no files to encode");
        return Ok(BatchReport::default());
    }

    fs::create_dir_all(&job.destination_directory)
        .map_err(|e| ScriptError::io(&job.destination_directory, e))?;

    let settings = &job.settings;
    let mut invocations = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = output_name(&input, &settings.suffix, &settings.extension)?;
        let output = job.destination_directory.join(name);
        invocations.push(settings.invocation(&input, output));
    }

    Ok(run_jobs(invocations, invoker))
}

/// Encodes one file next to itself.
pub fn run_single(
    path: &Path,
    settings: &EncodeSettings,
    invoker: &mut dyn Invoker,
) -> Result<PathBuf, ScriptError> {
    if !path.is_file() {
        return Err(ScriptError::InvalidInput {
            path: path.to_path_buf(),
        });
    }

    let name = output_name(path, &settings.suffix, &settings.extension)?;
    let output = path.with_file_name(name);
    invoker.invoke(&settings.invocation(path, output.clone()))?;
    Ok(output)
}
