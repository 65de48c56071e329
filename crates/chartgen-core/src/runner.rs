//! External command execution
//!
//! Every helm call goes through a [`ProcessRunner`]. The generator owns one as a
//! trait object, so tests can substitute a recording fake while production code
//! uses [`SystemRunner`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;

use crate::config::GeneratorConfig;
use crate::error::ProcessError;

pub const HELM_CONFIG_HOME: &str = "HELM_CONFIG_HOME";
pub const HELM_CACHE_HOME: &str = "HELM_CACHE_HOME";
pub const HELM_DATA_HOME: &str = "HELM_DATA_HOME";

/// A single external process execution request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Added on top of the inherited environment
    pub env: BTreeMap<String, String>,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// A helm invocation isolated under the configured helm home
    pub fn helm<I, S>(config: &GeneratorConfig, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: config.helm_bin.clone(),
            args: args.into_iter().map(Into::into).collect(),
            env: helm_env(&config.helm_home),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Environment that points helm's config, cache and data homes into `helm_home`
pub fn helm_env(helm_home: &Path) -> BTreeMap<String, String> {
    BTreeMap::from([
        (HELM_CONFIG_HOME.to_string(), helm_home.display().to_string()),
        (
            HELM_CACHE_HOME.to_string(),
            helm_home.join(".cache").display().to_string(),
        ),
        (
            HELM_DATA_HOME.to_string(),
            helm_home.join(".data").display().to_string(),
        ),
    ])
}

/// Runs external commands and captures their standard output
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion, returning stdout on a zero exit status
    fn run(&self, invocation: &CommandInvocation) -> Result<Vec<u8>, ProcessError>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for Arc<T> {
    fn run(&self, invocation: &CommandInvocation) -> Result<Vec<u8>, ProcessError> {
        (**self).run(invocation)
    }
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for Box<T> {
    fn run(&self, invocation: &CommandInvocation) -> Result<Vec<u8>, ProcessError> {
        (**self).run(invocation)
    }
}

/// Runs commands as child processes of the current process
///
/// Each call drives the child on its own current-thread tokio runtime, so the
/// deadline covers the wait and the pipe reads together. A child that outlives
/// the deadline is killed and its pipes are abandoned, even if processes it
/// started still hold them open.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any command that has not exited after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn execute(
        &self,
        invocation: &CommandInvocation,
        command: &str,
    ) -> Result<Vec<u8>, ProcessError> {
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| {
                    tracing::warn!(command = %command, ?timeout, "command timed out, killed");
                    ProcessError::TimedOut {
                        command: command.to_string(),
                        timeout,
                    }
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|source| ProcessError::Io {
            command: command.to_string(),
            source,
        })?;

        finish(command, output)
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<Vec<u8>, ProcessError> {
        let command = invocation.to_string();
        tracing::debug!(command = %command, "running command");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ProcessError::Io {
                command: command.clone(),
                source,
            })?;

        runtime.block_on(self.execute(invocation, &command))
    }
}

fn finish(command: &str, output: Output) -> Result<Vec<u8>, ProcessError> {
    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(ProcessError::Failed {
            command: command.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
