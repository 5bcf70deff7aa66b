// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs that spawn external processes

use async_trait::async_trait;
use chime_core::{BoxError, Job};
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Errors from a command run
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program:?} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// A job that runs an external command
///
/// The command's output is captured and logged; a non-zero exit status
/// counts as a failed run, so the scheduler's retry budget applies.
///
/// ```
/// use chime_jobs::CommandJob;
///
/// let job = CommandJob::new("git").args(["gc", "--auto"]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandJob {
    program: String,
    args: Vec<String>,
}

impl CommandJob {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl Job for CommandJob {
    async fn run(&self) -> Result<(), BoxError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.stdout.is_empty() {
            debug!(
                program = %self.program,
                stdout = %String::from_utf8_lossy(&output.stdout),
                "command stdout"
            );
        }
        if !output.stderr.is_empty() {
            warn!(
                program = %self.program,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "command stderr"
            );
        }

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: self.program.clone(),
                status: output.status,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
