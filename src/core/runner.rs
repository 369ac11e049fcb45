use std::io;
use std::process::Command;

use tracing::debug;

use crate::core::command::Invocation;
use crate::core::error::ScriptError;

pub const DEFAULT_PROGRAM: &str = "ffmpeg";

pub trait Invoker {
    fn invoke(&mut self, invocation: &Invocation) -> Result<(), ScriptError>;
}

/// Runs the external tool directly, no shell in between. The child shares
/// our terminal, so its own `-stats` output shows up as-is.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, invocation: &Invocation) -> Result<(), ScriptError> {
        println!("{}", invocation.command_line(&self.program));

        let mut cmd = Command::new(&self.program);
        cmd.args(invocation.to_args());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ScriptError::BinaryNotFound {
                    program: self.program.clone(),
                }
            } else {
                ScriptError::Spawn {
                    program: self.program.clone(),
                    source: e,
                }
            }
        })?;

        let status = child.wait().map_err(|e| ScriptError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;
        println!();

        debug!(%status, output = %invocation.output.display(), "encoder exited");
        if status.success() {
            Ok(())
        } else {
            Err(ScriptError::ProcessFailed {
                exit_code: status.code(),
            })
        }
    }
}

#[cfg(test)]
pub mod fake {
    use std::path::PathBuf;

    use super::*;

    /// Records every invocation; fails those whose input file name is listed.
    #[derive(Debug, Default)]
    pub struct RecordingInvoker {
        pub calls: Vec<Invocation>,
        pub fail_on: Vec<String>,
    }

    impl RecordingInvoker {
        pub fn failing_on(names: &[&str]) -> Self {
            Self {
                calls: Vec::new(),
                fail_on: names.iter().map(|s| s.to_string()).collect(),
            }
        }

        pub fn inputs(&self) -> Vec<PathBuf> {
            self.calls.iter().map(|c| c.input.clone()).collect()
        }
    }

    impl Invoker for RecordingInvoker {
        fn invoke(&mut self, invocation: &Invocation) -> Result<(), ScriptError> {
            self.calls.push(invocation.clone());
            let name = invocation
                .input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.fail_on.contains(&name) {
                Err(ScriptError::ProcessFailed { exit_code: Some(1) })
            } else {
                Ok(())
            }
        }
    }
}
