use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<OsString>,
    /// Capture stdout/stderr instead of inheriting the terminal.
    pub capture: bool,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture: true,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn inherit_stdio(mut self) -> Self {
        self.capture = false;
        self
    }

    pub fn version_query(program: impl Into<String>) -> Self {
        Self::new(program).arg("--version")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("`{program}` not found. Is it installed in the system path?")]
    NotFound { program: String },
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with {}{}", describe_code(.code), describe_stderr(.stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Executes [`ToolCommand`]s. Returns captured stdout on success (empty when
/// stdio is inherited).
pub trait CommandRunner {
    fn run(&self, command: &ToolCommand) -> Result<String, RunError>;
}

/// Runs commands as real child processes resolved through `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<String, RunError> {
        let program = &command.program;
        let resolved = which::which(program).map_err(|_| RunError::NotFound {
            program: program.clone(),
        })?;
        debug!("running {command} ({})", resolved.display());

        let mut cmd = Command::new(&resolved);
        cmd.args(&command.args);

        if !command.capture {
            let status = cmd.status().map_err(|source| spawn_error(program, source))?;
            if !status.success() {
                return Err(RunError::Failed {
                    program: program.clone(),
                    code: status.code(),
                    stderr: String::new(),
                });
            }
            return Ok(String::new());
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        let out = cmd.output().map_err(|source| spawn_error(program, source))?;
        if !out.status.success() {
            return Err(RunError::Failed {
                program: program.clone(),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

fn spawn_error(program: &str, source: io::Error) -> RunError {
    if source.kind() == io::ErrorKind::NotFound {
        RunError::NotFound {
            program: program.to_string(),
        }
    } else {
        RunError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}
