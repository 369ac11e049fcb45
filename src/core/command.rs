use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Input-side flags every encode starts with.
pub const DEFAULT_INPUT_ARGS: [&str; 4] = ["-v", "quiet", "-stats", "-n"];

/// Plays the clip forward, then reversed, twice over.
pub const LOOP_FILTER: [&str; 2] = ["-filter_complex", "[0]reverse[r];[0][r]concat,loop=2"];

/// One call of the external tool: `<input args> -i <input> <output args> <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input_args: Vec<String>,
    pub input: PathBuf,
    pub output_args: Vec<String>,
    pub output: PathBuf,
}

impl Invocation {
    pub fn new(
        input_args: &[String],
        input: impl Into<PathBuf>,
        output_args: &[String],
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_args: input_args.to_vec(),
            input: input.into(),
            output_args: output_args.to_vec(),
            output: output.into(),
        }
    }

    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.input_args.len() + self.output_args.len() + 3);

        args.extend(self.input_args.iter().map(OsString::from));
        args.push("-i".into());
        args.push(self.input.clone().into_os_string());
        args.extend(self.output_args.iter().map(OsString::from));
        args.push(self.output.clone().into_os_string());

        args
    }

    /// Shell-quoted rendering, printed before the process starts.
    pub fn command_line(&self, program: &str) -> String {
        let mut words = vec![program.to_string()];
        words.extend(
            self.to_args()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        shell_words::join(words)
    }
}

/// Flags shared by every file of one encode session.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub input_args: Vec<String>,
    pub output_args: Vec<String>,
    pub extension: String,
    pub suffix: String,
}

impl EncodeSettings {
    pub fn invocation(&self, input: &Path, output: PathBuf) -> Invocation {
        Invocation::new(&self.input_args, input, &self.output_args, output)
    }
}

pub fn input_args(fps: Option<u32>) -> Vec<String> {
    let mut args: Vec<String> = DEFAULT_INPUT_ARGS.iter().map(|s| s.to_string()).collect();
    if let Some(fps) = fps {
        args.push("-r".to_string());
        args.push(fps.to_string());
    }
    args
}

pub fn output_args(looped: bool, codec_args: Vec<String>) -> Vec<String> {
    let mut args = Vec::new();
    if looped {
        args.extend(LOOP_FILTER.iter().map(|s| s.to_string()));
    }
    args.extend(codec_args);
    args
}
