//! Running rc on a background thread.
//!
//! Every [`RcCall::execute`] spawns one dedicated OS thread which owns a
//! single-threaded tokio runtime, runs the child process under a deadline
//! and hands back an [`InvocationResult`]. The caller blocks in
//! [`RcHandle::join`]. Failures never cross the join boundary as panics or
//! errors; they are described by the result.

use std::process::{Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error, trace, warn};

use super::command::Invocation;
use super::exit_code::{classify, Classification, Severity};
use crate::config::DEFAULT_TIMEOUT_SECS;

/// Outcome of one rc invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// Rendered command line, for diagnostics.
    pub command: String,
    pub succeeded: bool,
    /// Set only when rc exited on its own with a nonzero code.
    pub exit_code: Option<i32>,
    /// UTF-8 decoded and trimmed.
    pub stdout: String,
    /// Captured stderr, or the launch error when rc could not be started.
    pub stderr: String,
    pub timed_out: bool,
}

impl InvocationResult {
    fn success(command: String, stdout: String) -> Self {
        Self {
            command,
            succeeded: true,
            exit_code: None,
            stdout,
            stderr: String::new(),
            timed_out: false,
        }
    }

    fn exited(command: String, exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            command,
            succeeded: false,
            exit_code,
            stdout,
            stderr,
            timed_out: false,
        }
    }

    fn timed_out(command: String) -> Self {
        Self {
            command,
            succeeded: false,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            timed_out: true,
        }
    }

    fn launch_failure(command: String, reason: impl Into<String>) -> Self {
        Self {
            command,
            succeeded: false,
            exit_code: None,
            stdout: String::new(),
            stderr: reason.into(),
            timed_out: false,
        }
    }

    /// Classification of the exit code, if rc exited with a failure code.
    pub fn classification(&self) -> Option<Classification> {
        match self.exit_code {
            Some(code) if !self.succeeded => Some(classify(code)),
            _ => None,
        }
    }
}

/// Spawns rc invocations. Holds no per-call state, so one instance can be
/// reused for sequential calls and separate instances never interfere.
#[derive(Debug, Clone)]
pub struct RcCall {
    timeout: Duration,
}

impl Default for RcCall {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl RcCall {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start `invocation` on its own thread.
    pub fn execute(&self, invocation: Invocation) -> RcHandle {
        let timeout = self.timeout;
        let command = invocation.render();

        let spawned = thread::Builder::new()
            .name("rc-call".to_string())
            .spawn(move || run_blocking(&invocation, timeout));

        match spawned {
            Ok(handle) => RcHandle {
                command,
                state: HandleState::Running(handle),
            },
            Err(e) => {
                error!(command = %command, error = %e, "failed to spawn rc thread");
                RcHandle {
                    command: command.clone(),
                    state: HandleState::Finished(InvocationResult::launch_failure(
                        command,
                        e.to_string(),
                    )),
                }
            }
        }
    }

    /// `execute` followed by `join`.
    pub fn run(&self, invocation: Invocation) -> InvocationResult {
        self.execute(invocation).join()
    }
}

/// A started invocation.
pub struct RcHandle {
    command: String,
    state: HandleState,
}

enum HandleState {
    Running(JoinHandle<InvocationResult>),
    Finished(InvocationResult),
}

impl RcHandle {
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Block until the background thread finishes. Bounded by the timeout
    /// given to [`RcCall`], since the thread kills rc when it expires.
    pub fn join(self) -> InvocationResult {
        match self.state {
            HandleState::Finished(result) => result,
            HandleState::Running(handle) => match handle.join() {
                Ok(result) => result,
                Err(_) => {
                    error!(command = %self.command, "rc thread panicked");
                    InvocationResult::launch_failure(self.command, "rc thread panicked")
                }
            },
        }
    }
}

fn run_blocking(invocation: &Invocation, limit: Duration) -> InvocationResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();

    match runtime {
        Ok(runtime) => runtime.block_on(run(invocation, limit)),
        Err(e) => {
            error!(error = %e, "failed to build runtime for rc call");
            InvocationResult::launch_failure(invocation.render(), e.to_string())
        }
    }
}

async fn run(invocation: &Invocation, limit: Duration) -> InvocationResult {
    let command = invocation.render();
    let argv = invocation.argv();
    let Some((program, args)) = argv.split_first() else {
        return InvocationResult::launch_failure(command, "empty command line");
    };

    debug!(command = %command, "about to execute rc");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            error!(command = %command, error = %e, "failed to launch rc");
            return InvocationResult::launch_failure(command, e.to_string());
        }
    };

    // Dropping the wait future on expiry drops the child, which kills it.
    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Err(_) => {
            warn!(
                command = %command,
                timeout_ms = limit.as_millis() as u64,
                "rc did not finish in time; rdm may be unresponsive"
            );
            InvocationResult::timed_out(command)
        }
        Ok(Err(e)) => {
            error!(command = %command, error = %e, "failed to collect rc output");
            InvocationResult::launch_failure(command, e.to_string())
        }
        Ok(Ok(output)) => from_output(command, output),
    }
}

fn from_output(command: String, output: Output) -> InvocationResult {
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if output.status.success() {
        debug!(output = %stdout, "successfully executed rc command");
        return InvocationResult::success(command, stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let result = InvocationResult::exited(command, output.status.code(), stdout, stderr);
    log_failure(&result);
    result
}

fn log_failure(result: &InvocationResult) {
    let Some(classification) = result.classification() else {
        warn!(
            command = %result.command,
            stderr = %result.stderr,
            "rc terminated without an exit code"
        );
        return;
    };

    let kind = classification
        .kind
        .map(|k| k.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match classification.severity {
        Severity::Silent => trace!(command = %result.command, code = classification.code, "rc exited"),
        Severity::Logged => warn!(
            command = %result.command,
            code = classification.code,
            kind = %kind,
            output = %result.stdout,
            stderr = %result.stderr,
            "rc error suppressed from user"
        ),
        Severity::UserFacing => error!(
            command = %result.command,
            code = classification.code,
            kind = %kind,
            output = %result.stdout,
            stderr = %result.stderr,
            "executing rc resulted in an error"
        ),
    }
}
