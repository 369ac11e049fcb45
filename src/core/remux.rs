use std::path::Path;

use crate::core::batch::{list_files, name_ends_with, run_jobs};
use crate::core::command::Invocation;
use crate::core::error::ScriptError;
use crate::core::job::BatchReport;
use crate::core::runner::Invoker;

pub const REMUX_ARGS: [&str; 2] = ["-c", "copy"];

/// Stream-copy invocations for every file in `directory` whose name ends with
/// `extension`. Outputs stay in `directory`.
pub fn remux_invocations(
    directory: &Path,
    extension: &str,
    new_extension: &str,
) -> Result<Vec<Invocation>, ScriptError> {
    let output_args: Vec<String> = REMUX_ARGS.iter().map(|s| s.to_string()).collect();

    let mut invocations = Vec::new();
    for input in list_files(directory)? {
        let (Some(name), Some(stem)) = (input.file_name(), input.file_stem()) else {
            continue;
        };
        if !name_ends_with(name, extension) {
            continue;
        }
        let mut output_name = stem.to_os_string();
        output_name.push(new_extension);
        let output = directory.join(output_name);
        invocations.push(Invocation::new(&[], &input, &output_args, output));
    }
    Ok(invocations)
}

pub fn remux_directory(
    directory: &Path,
    extension: &str,
    new_extension: &str,
    invoker: &mut dyn Invoker,
) -> Result<BatchReport, ScriptError> {
    let invocations = remux_invocations(directory, extension, new_extension)?;
    Ok(run_jobs(invocations, invoker))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::runner::fake::RecordingInvoker;

    #[test]
    fn only_matching_files_are_remuxed() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mkv", "b.MKV", "c.mp4", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("d.mkv")).unwrap();

        let mut invoker = RecordingInvoker::default();
        let report = remux_directory(dir.path(), ".mkv", ".mov", &mut invoker).unwrap();

        assert_eq!(report.jobs.len(), 1);
        let call = &invoker.calls[0];
        assert_eq!(call.input, dir.path().join("a.mkv"));
        assert_eq!(call.output, dir.path().join("a.mov"));
        assert!(call.input_args.is_empty());
        assert_eq!(call.output_args, vec!["-c".to_string(), "copy".to_string()]);
    }

    #[test]
    fn failures_do_not_stop_remux() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.ts", "b.ts"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let mut invoker = RecordingInvoker::failing_on(&["a.ts"]);
        let report = remux_directory(dir.path(), "ts", ".mp4", &mut invoker).unwrap();

        assert_eq!(report.failed(), 1);
        assert_eq!(report.finished(), 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_survive() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(OsStr::from_bytes(b"caf\xe9.mkv"));
        fs::write(&input, b"").unwrap();

        let invocations = remux_invocations(dir.path(), ".mkv", ".mp4").unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].input, input);
        assert_eq!(
            invocations[0].output,
            dir.path().join(OsStr::from_bytes(b"caf\xe9.mp4"))
        );
    }
}
