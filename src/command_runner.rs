//! External command execution.
//!
//! All external programs go through a `CommandRunner`. `SystemRunner`
//! spawns real processes; `ScriptedRunner` replays canned outputs and records
//! the command lines it was asked to run, which is how the orchestrator is
//! exercised off AIX.
//!
//! Runners never interpret exit codes. Callers decide what a nonzero status
//! means through `CommandOutput::ensure_success`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::command_traits::ToolArgs;
use crate::error::{Result, SumaError};

/// Output from a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
            success: true,
        }
    }

    /// Failed output with the given exit code.
    pub fn failed(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: Some(code),
            success: code == 0,
        }
    }

    /// Exit code, or -1 if terminated by signal.
    pub fn code(&self) -> i32 {
        self.exit_code.unwrap_or(-1)
    }

    /// Turn a nonzero exit into a `SumaError::Command`.
    ///
    /// `context` is the message prefix; the return code is appended to it.
    pub fn ensure_success(self, context: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        let msg = format!("{} failed with return code {}", context, self.code());
        tracing::error!(
            "{}, stderr: {}, stdout: {}",
            msg,
            self.stderr.trim(),
            self.stdout.trim()
        );
        Err(SumaError::command(msg, self.stdout, self.stderr))
    }
}

/// Seam between the module logic and process spawning.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], env: &[(String, String)])
    -> Result<CommandOutput>;
}

/// Execute a command described by typed arguments.
pub fn run_tool<R, T>(runner: &R, args: &T) -> Result<CommandOutput>
where
    R: CommandRunner + ?Sized,
    T: ToolArgs,
{
    let cli_args = args.to_cli_args();
    let env_vars = args.get_env_vars();
    debug!("run_tool: {} args={:?}", args.program(), cli_args);

    let output = runner.run(args.program(), &cli_args, &env_vars)?;
    debug!(
        "{} rc:{} stdout:{}",
        args.command_line(),
        output.code(),
        output.stdout.trim_end()
    );
    Ok(output)
}

/// Runs commands on the local system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| {
            SumaError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to execute '{}': {}", program, e),
            ))
        })?;

        let exit_code = output.status.code();
        if !output.status.success() {
            info!("{} exited with code {}", program, exit_code.unwrap_or(-1));
        }
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
            success: output.status.success(),
        })
    }
}

/// Replays queued outputs in order and records every command line.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<CommandOutput>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output of the next command.
    pub fn push(&self, output: CommandOutput) -> &Self {
        self.responses.borrow_mut().push_back(output);
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Outputs queued but never consumed.
    pub fn pending(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        _env: &[(String, String)],
    ) -> Result<CommandOutput> {
        let mut line = vec![program.to_string()];
        line.extend(args.iter().cloned());
        let line = line.join(" ");
        self.calls.borrow_mut().push(line.clone());

        self.responses.borrow_mut().pop_front().ok_or_else(|| {
            SumaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no scripted output for '{}'", line),
            ))
        })
    }
}
