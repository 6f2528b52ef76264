//! Runs the external orchestration CLI (`oc` by default).
//!
//! Everything the Kubernetes client cannot express directly (projects,
//! rollouts, exposure, scaling, exec, secrets from files) is delegated to the
//! CLI through [`CommandRunner`].

mod error;

use std::{borrow::Cow, process::Stdio};

use snafu::ResultExt;

pub use self::error::Error;

/// Captured output of a successful CLI invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout lines joined with `\n`, without the trailing newline.
    #[must_use]
    pub fn joined_lines(&self) -> String { self.stdout.lines().collect::<Vec<_>>().join("\n") }
}

pub trait CommandRunner {
    /// Runs the CLI with `args` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be launched or exits with a
    /// non-zero status.
    async fn run<I, S>(&self, args: I) -> Result<CommandOutput, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;
}

#[derive(Clone, Debug)]
pub struct ProcessRunner {
    program: String,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self { Self { program: program.into() } }

    #[must_use]
    pub fn program(&self) -> &str { &self.program }
}

impl CommandRunner for ProcessRunner {
    async fn run<I, S>(&self, args: I) -> Result<CommandOutput, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        let command = render_command_line(&self.program, &args);
        tracing::debug!("Running `{command}`");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|_| error::SpawnSnafu { command: command.clone() })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            let message = if stderr.trim().is_empty() { stdout } else { stderr };
            error::ExitStatusSnafu {
                command,
                code: output.status.code(),
                message: message.trim().to_string(),
            }
            .fail()
        }
    }
}

pub fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|arg| shell_escape::escape(Cow::Borrowed(arg)))
        .collect::<Vec<_>>()
        .join(" ")
}
