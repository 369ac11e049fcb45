use std::path::{Path, PathBuf};

use crate::core::command::Invocation;
use crate::core::error::ScriptError;
use crate::core::runner::Invoker;

/// Drops duplicate frames, then re-times what is left.
pub const DECIMATE_ARGS: [&str; 8] = [
    "-vf",
    "mpdecimate,setpts=N/FRAME_RATE/TB",
    "-c:v",
    "dnxhd",
    "-profile:v",
    "dnxhr_hqx",
    "-pix_fmt",
    "yuv422p10le",
];

pub fn decimated_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("-decimated.mov");
    input.with_file_name(name)
}

pub fn decimate(input: &Path, invoker: &mut dyn Invoker) -> Result<PathBuf, ScriptError> {
    if !input.is_file() {
        return Err(ScriptError::InvalidInput {
            path: input.to_path_buf(),
        });
    }

    let output_args: Vec<String> = DECIMATE_ARGS.iter().map(|s| s.to_string()).collect();
    let output = decimated_path(input);
    invoker.invoke(&Invocation::new(&[], input, &output_args, output.clone()))?;
    Ok(output)
}
